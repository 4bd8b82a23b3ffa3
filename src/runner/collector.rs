use crate::capture::{CaptureGuard, CaptureStreams, CapturedOutput};
use crate::report::{ExceptionInfo, ReportBuilder, TestIdentity, TestStatus};
use crate::runner::listener::TestListener;
use crate::runner::reporter::ConsoleReporter;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// 结果收集器
///
/// 为每个测试计时、捕获输出，并把结果交给 [`ReportBuilder`]。
#[derive(Debug)]
pub struct ResultCollector {
    builder: ReportBuilder,
    streams: CaptureStreams,
    active: Option<CaptureGuard>,
    started_at: Option<Instant>,
    reporter: ConsoleReporter,
}

impl ResultCollector {
    pub fn new(reporter: ConsoleReporter) -> Self {
        Self {
            builder: ReportBuilder::new(),
            streams: CaptureStreams::new(),
            active: None,
            started_at: None,
            reporter,
        }
    }

    /// 测试代码应写入的 stdout/stderr 替身
    pub fn streams(&self) -> &CaptureStreams {
        &self.streams
    }

    pub fn builder(&self) -> &ReportBuilder {
        &self.builder
    }

    pub fn into_builder(self) -> ReportBuilder {
        self.builder
    }

    /// 是否有测试正在捕获
    pub fn is_capturing(&self) -> bool {
        self.active.is_some()
    }

    /// 排空捕获缓冲区，同时恢复控制台
    fn drain(&mut self) -> CapturedOutput {
        self.active
            .take()
            .map(CaptureGuard::release)
            .unwrap_or_default()
    }

    fn finish(&mut self, test: &TestIdentity, status: TestStatus) -> (Duration, CapturedOutput) {
        let elapsed = self
            .started_at
            .take()
            .map(|start| start.elapsed())
            .unwrap_or(Duration::ZERO);
        let output = self.drain();
        self.reporter.print_trace(status, test);
        (elapsed, output)
    }
}

impl Default for ResultCollector {
    fn default() -> Self {
        Self::new(ConsoleReporter::default())
    }
}

impl TestListener for ResultCollector {
    fn on_start(&mut self, test: &TestIdentity) {
        debug!(test = %test, "Test started");
        if let Some(previous) = self.active.take() {
            warn!(test = %test, "Test started while another capture was active");
            drop(previous);
        }
        self.started_at = Some(Instant::now());
        self.active = Some(CaptureGuard::acquire(&self.streams));
    }

    fn on_success(&mut self, test: &TestIdentity) {
        let (elapsed, output) = self.finish(test, TestStatus::Passed);
        self.builder.record_passed(test, elapsed, output);
    }

    fn on_failure(&mut self, test: &TestIdentity, failure: ExceptionInfo) {
        let (elapsed, output) = self.finish(test, TestStatus::Failed);
        self.builder.record_failed(test, elapsed, failure, output);
    }

    fn on_error(&mut self, test: &TestIdentity, error: ExceptionInfo) {
        let (elapsed, output) = self.finish(test, TestStatus::Error);
        self.builder.record_error(test, elapsed, error, output);
    }

    fn on_stop(&mut self, test: &TestIdentity) {
        match self.active.take() {
            Some(guard) => {
                let leftover = guard.release();
                debug!(
                    test = %test,
                    stdout_len = leftover.stdout.len(),
                    stderr_len = leftover.stderr.len(),
                    "Test stopped without an outcome; captured output dropped"
                );
            }
            None => debug!(test = %test, "Test stopped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> ResultCollector {
        ResultCollector::new(ConsoleReporter::new(false))
    }

    #[test]
    fn test_success_records_captured_output() {
        let mut c = collector();
        let test = TestIdentity::new("m", "C", "test_ok");
        c.on_start(&test);
        c.streams().stdout.write("hello\n");
        c.streams().stderr.write(b"oops");
        c.on_success(&test);
        c.on_stop(&test);

        let records = c.builder().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, TestStatus::Passed);
        assert_eq!(records[0].stdout, "hello\n");
        assert_eq!(records[0].stderr, "oops");
        assert!(records[0].failure.is_none());
        assert!(!c.is_capturing());
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut c = collector();
        let test = TestIdentity::new("m", "C", "test_twice");
        c.on_stop(&test);

        c.on_start(&test);
        c.on_failure(&test, ExceptionInfo::assertion("bad"));
        c.on_stop(&test);
        c.on_stop(&test);

        assert_eq!(c.builder().records().len(), 1);
        assert_eq!(c.builder().summary().failed, 1);
    }

    #[test]
    fn test_output_after_outcome_goes_to_console() {
        let mut c = collector();
        let test = TestIdentity::new("m", "C", "test_x");
        c.on_start(&test);
        c.on_error(&test, ExceptionInfo::new("panic", "boom"));
        assert!(!c.streams().stdout.is_capturing());

        let next = TestIdentity::new("m", "C", "test_y");
        c.on_start(&next);
        c.streams().stdout.write("only y");
        c.on_success(&next);

        let records = c.builder().records();
        assert_eq!(records[0].stdout, "");
        assert_eq!(records[1].stdout, "only y");
    }

    #[test]
    fn test_outcome_without_start_has_zero_elapsed() {
        let mut c = collector();
        let test = TestIdentity::new("m", "C", "test_orphan");
        c.on_success(&test);
        assert_eq!(c.builder().records()[0].elapsed, Duration::ZERO);
    }
}
