use crate::report::ReportProperty;
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

pub const DEFAULT_REPORT_NAME: &str = "XMLTestExecutor Report";

/// XML 报告的输出端
#[derive(Default)]
pub enum OutputSink {
    /// 进程标准输出
    #[default]
    Stdout,
    /// 写入文件，已存在则覆盖
    File(PathBuf),
    /// 任意写入器
    Writer(Box<dyn Write>),
}

impl OutputSink {
    /// 写入完整报告并刷新
    pub fn write_report(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self {
            OutputSink::Stdout => {
                let mut out = io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            OutputSink::File(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent)?;
                    }
                }
                fs::write(path, bytes)
            }
            OutputSink::Writer(writer) => {
                writer.write_all(bytes)?;
                writer.flush()
            }
        }
    }
}

impl fmt::Display for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => write!(f, "stdout"),
            OutputSink::File(path) => write!(f, "{}", path.display()),
            OutputSink::Writer(_) => write!(f, "<writer>"),
        }
    }
}

impl fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputSink::Stdout => f.write_str("Stdout"),
            OutputSink::File(path) => f.debug_tuple("File").field(path).finish(),
            OutputSink::Writer(_) => f.write_str("Writer(..)"),
        }
    }
}

/// 执行器配置
#[derive(Debug)]
pub struct ExecutorConfig {
    pub output: OutputSink,
    pub report_name: String,
    pub properties: Vec<ReportProperty>,
}

impl ExecutorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, output: OutputSink) -> Self {
        self.output = output;
        self
    }

    pub fn with_report_name(mut self, name: impl Into<String>) -> Self {
        self.report_name = name.into();
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(ReportProperty::new(name, value));
        self
    }
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            output: OutputSink::Stdout,
            report_name: DEFAULT_REPORT_NAME.to_string(),
            properties: Vec::new(),
        }
    }
}

/// `xmltest.toml` 的内容
///
/// ```toml
/// name = "nightly"
/// output = "target/report.xml"
///
/// [[properties]]
/// name = "env"
/// value = "staging"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub name: Option<String>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub properties: Vec<ReportProperty>,
}

impl FileConfig {
    /// 覆盖到 `config` 上，文件中出现的字段优先
    pub fn apply(self, mut config: ExecutorConfig) -> ExecutorConfig {
        if let Some(name) = self.name {
            config.report_name = name;
        }
        if let Some(path) = self.output {
            config.output = OutputSink::File(path);
        }
        config.properties.extend(self.properties);
        config
    }
}
