use crate::config::types::FileConfig;
use crate::error::{Result, XmlTestError};
use crate::report::ReportProperty;
use std::fs;
use std::path::Path;
use tracing::debug;

/// 配置文件加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 配置文件名
    pub const CONFIG_FILE: &'static str = "xmltest.toml";

    /// 从指定路径加载配置文件
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<FileConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            XmlTestError::ConfigError(format!("无法读取 {}: {}", path.display(), e))
        })?;

        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// 查找并加载配置文件
    /// 查找顺序：
    /// 1. 当前目录及父目录
    /// 2. 用户配置目录 ~/.config/xmltest/
    ///
    /// 找到但解析失败时返回错误
    pub fn find_and_load() -> Result<Option<FileConfig>> {
        if let Some(path) = Self::find_in_current_dir() {
            return Self::load_from_path(path).map(Some);
        }

        if let Some(path) = Self::find_in_user_dir() {
            return Self::load_from_path(path).map(Some);
        }

        Ok(None)
    }

    fn find_in_current_dir() -> Option<std::path::PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(Self::CONFIG_FILE);
            if config_path.is_file() {
                return Some(config_path);
            }

            // 尝试父目录
            if !current.pop() {
                break;
            }
        }

        None
    }

    fn find_in_user_dir() -> Option<std::path::PathBuf> {
        let home = dirs::home_dir()?;
        let config_path = home.join(".config").join("xmltest").join(Self::CONFIG_FILE);
        config_path.is_file().then_some(config_path)
    }
}

/// 解析 CLI 属性参数 "key=value"
pub fn parse_property(s: &str) -> Result<ReportProperty> {
    match s.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok(ReportProperty::new(name.trim(), value.trim()))
        }
        _ => Err(XmlTestError::InvalidProperty(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::{ExecutorConfig, OutputSink};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_path() {
        let config_content = r#"
name = "nightly"
output = "out/report.xml"

[[properties]]
name = "env"
value = "staging"

[[properties]]
name = "build"
value = "42"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(config_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = ConfigLoader::load_from_path(temp_file.path()).unwrap();
        assert_eq!(config.name.as_deref(), Some("nightly"));
        assert_eq!(config.properties.len(), 2);
        assert_eq!(config.properties[1], ReportProperty::new("build", "42"));
    }

    #[test]
    fn test_load_rejects_unknown_fields() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"colour = true\n").unwrap();
        temp_file.flush().unwrap();

        let err = ConfigLoader::load_from_path(temp_file.path()).unwrap_err();
        assert!(matches!(err, XmlTestError::TomlError(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ConfigLoader::load_from_path("/definitely/not/here/xmltest.toml").unwrap_err();
        assert!(matches!(err, XmlTestError::ConfigError(_)));
    }

    #[test]
    fn test_apply_overrides_defaults() {
        let file: FileConfig = toml::from_str(
            r#"
name = "from file"
output = "report.xml"
properties = [{ name = "k", value = "v" }]
"#,
        )
        .unwrap();

        let config = file.apply(ExecutorConfig::default());
        assert_eq!(config.report_name, "from file");
        assert!(matches!(config.output, OutputSink::File(ref p) if p.ends_with("report.xml")));
        assert_eq!(config.properties, vec![ReportProperty::new("k", "v")]);
    }

    #[test]
    fn test_parse_property() {
        assert_eq!(
            parse_property("env=staging").unwrap(),
            ReportProperty::new("env", "staging")
        );
        assert_eq!(
            parse_property("url=https://example.com?a=b").unwrap(),
            ReportProperty::new("url", "https://example.com?a=b")
        );
        assert_eq!(parse_property("empty=").unwrap(), ReportProperty::new("empty", ""));

        assert!(parse_property("invalid").is_err());
        assert!(parse_property("=value").is_err());
    }
}
