use crate::Result;
use crate::config::ExecutorConfig;
use crate::report::{ReportBuilder, RunSummary, TestRecord};
use crate::runner::collector::ResultCollector;
use crate::runner::listener::TestEngine;
use crate::runner::reporter::ConsoleReporter;
use chrono::Local;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct RunResult {
    pub builder: ReportBuilder,
    pub elapsed: Duration,
    /// 写入输出端的 XML 文档
    pub report: String,
}

impl RunResult {
    pub fn records(&self) -> &[TestRecord] {
        self.builder.records()
    }

    pub fn summary(&self) -> RunSummary {
        self.builder.summary()
    }

    pub fn was_successful(&self) -> bool {
        self.summary().is_success()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.was_successful() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// 驱动一次运行并写出 XML 报告
pub struct XmlTestExecutor {
    config: ExecutorConfig,
    reporter: ConsoleReporter,
}

impl XmlTestExecutor {
    pub fn new(config: ExecutorConfig) -> Self {
        Self {
            config,
            reporter: ConsoleReporter::default(),
        }
    }

    pub fn with_reporter(mut self, reporter: ConsoleReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// 运行引擎中的全部测试
    ///
    /// 只有写出报告失败时返回错误，测试失败不算错误。
    pub fn run<E>(&mut self, engine: &mut E) -> Result<RunResult>
    where
        E: TestEngine + ?Sized,
    {
        let name = self.config.report_name.clone();
        self.reporter
            .print_banner(&name, &self.config.properties, Local::now());

        let start = Instant::now();
        let mut collector = ResultCollector::new(self.reporter);
        engine.run(&mut collector);
        let elapsed = start.elapsed();

        if collector.is_capturing() {
            warn!("Engine returned while a capture was still active");
        }
        let builder = collector.into_builder();
        let summary = builder.summary();
        self.reporter.print_statistics(&summary, elapsed);

        let report = builder.render(&name, elapsed, &self.config.properties);
        self.config.output.write_report(report.as_bytes())?;
        info!(
            tests = summary.total(),
            failures = summary.failed,
            errors = summary.errors,
            sink = %self.config.output,
            "Report written"
        );

        Ok(RunResult {
            builder,
            elapsed,
            report,
        })
    }
}

impl Default for XmlTestExecutor {
    fn default() -> Self {
        Self::new(ExecutorConfig::default())
    }
}
