use crate::capture::CaptureStreams;
use crate::report::{ExceptionInfo, TestIdentity};
use crate::runner::collector::ResultCollector;
use crate::runner::listener::{TestEngine, TestListener};
use crate::runner::panic::catch_panic;

/// 测试体: 返回 `Err` 为断言失败，panic 为错误
pub type TestBody = Box<dyn FnMut(&CaptureStreams) -> Result<(), ExceptionInfo>>;

pub struct TestCase {
    pub identity: TestIdentity,
    body: TestBody,
}

impl TestCase {
    pub fn new<F>(identity: TestIdentity, body: F) -> Self
    where
        F: FnMut(&CaptureStreams) -> Result<(), ExceptionInfo> + 'static,
    {
        Self {
            identity,
            body: Box::new(body),
        }
    }
}

impl std::fmt::Debug for TestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestCase")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// 内置的顺序执行引擎
#[derive(Debug, Default)]
pub struct SuiteRunner {
    cases: Vec<TestCase>,
}

impl SuiteRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<F>(&mut self, identity: TestIdentity, body: F) -> &mut Self
    where
        F: FnMut(&CaptureStreams) -> Result<(), ExceptionInfo> + 'static,
    {
        self.cases.push(TestCase::new(identity, body));
        self
    }

    pub fn with_case<F>(mut self, identity: TestIdentity, body: F) -> Self
    where
        F: FnMut(&CaptureStreams) -> Result<(), ExceptionInfo> + 'static,
    {
        self.add(identity, body);
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// 依次运行所有测试，向 `listener` 发出完整的生命周期通知
    pub fn run_with(&mut self, listener: &mut dyn TestListener, streams: &CaptureStreams) {
        for case in &mut self.cases {
            let identity = &case.identity;
            listener.on_start(identity);

            match catch_panic(|| (case.body)(streams)) {
                Ok(Ok(())) => listener.on_success(identity),
                Ok(Err(failure)) => listener.on_failure(identity, failure),
                Err(error) => listener.on_error(identity, error),
            }

            listener.on_stop(identity);
        }
    }
}

impl TestEngine for SuiteRunner {
    fn run(&mut self, collector: &mut ResultCollector) {
        let streams = collector.streams().clone();
        self.run_with(collector, &streams);
    }
}
