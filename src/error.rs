use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlTestError {
    #[error("IO 错误: {0}")]
    IoError(#[from] std::io::Error),

    #[error("配置错误: {0}")]
    ConfigError(String),

    #[error("TOML 解析错误: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("无效的属性: {0} (期望 key=value)")]
    InvalidProperty(String),

    #[error("{0}")]
    Other(String),
}

// Add conversion from anyhow::Error
impl From<anyhow::Error> for XmlTestError {
    fn from(err: anyhow::Error) -> Self {
        XmlTestError::Other(err.to_string())
    }
}

/// Result type for xmltest crate
pub type Result<T> = std::result::Result<T, XmlTestError>;
