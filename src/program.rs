use crate::config::{ConfigLoader, ExecutorConfig, OutputSink, parse_property};
use crate::logger;
use crate::report::ReportProperty;
use crate::runner::{ConsoleReporter, RunResult, TestEngine, XmlTestExecutor};
use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a test suite and write a JUnit-style XML report", long_about = None)]
pub struct ProgramArgs {
    /// 报告名称
    #[arg(short, long)]
    pub name: Option<String>,

    /// 报告写入的文件（默认 stdout）
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 运行属性 key=value，可重复
    #[arg(short = 'p', long = "property", value_parser = parse_property)]
    pub properties: Vec<ReportProperty>,

    /// 配置文件路径（默认查找 xmltest.toml）
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// 关闭控制台颜色
    #[arg(long)]
    pub no_color: bool,
}

/// 命令行入口
///
/// 配置优先级: 默认值 < 配置文件 < 命令行参数
#[derive(Debug)]
pub struct TestProgram {
    args: ProgramArgs,
}

impl TestProgram {
    /// 从进程参数解析，参数错误时打印用法并退出
    pub fn from_env() -> Self {
        Self {
            args: ProgramArgs::parse(),
        }
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ProgramArgs::try_parse_from(args)?;
        Ok(Self { args })
    }

    pub fn args(&self) -> &ProgramArgs {
        &self.args
    }

    /// 合并配置文件和命令行参数
    pub fn config(&self) -> Result<ExecutorConfig> {
        let file = match &self.args.config {
            Some(path) => Some(
                ConfigLoader::load_from_path(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
            ),
            None => ConfigLoader::find_and_load()?,
        };

        let mut config = ExecutorConfig::default();
        if let Some(file) = file {
            config = file.apply(config);
        }

        if let Some(name) = &self.args.name {
            config.report_name = name.clone();
        }
        if let Some(path) = &self.args.output {
            config.output = OutputSink::File(path.clone());
        }
        config.properties.extend(self.args.properties.iter().cloned());

        Ok(config)
    }

    /// 运行并返回进程退出码: 有失败或错误时为 FAILURE
    pub fn run<E>(self, engine: &mut E) -> Result<ExitCode>
    where
        E: TestEngine + ?Sized,
    {
        Ok(self.execute(engine)?.exit_code())
    }

    /// 初始化日志，运行引擎，写出报告
    pub fn execute<E>(self, engine: &mut E) -> Result<RunResult>
    where
        E: TestEngine + ?Sized,
    {
        logger::init_logger();

        let config = self.config()?;
        let reporter = ConsoleReporter::new(!self.args.no_color);
        let mut executor = XmlTestExecutor::new(config).with_reporter(reporter);

        executor.run(engine).context("Failed to write test report")
    }
}
