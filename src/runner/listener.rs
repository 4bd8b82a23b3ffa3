use crate::report::{ExceptionInfo, TestIdentity};
use crate::runner::collector::ResultCollector;

/// 外部测试引擎每个测试调用一次的通知接口
///
/// 每个测试的顺序为 `on_start`，然后恰好一个结果通知
/// （`on_success` / `on_failure` / `on_error`），最后 `on_stop`。
/// 同一时刻只能有一个测试处于 start 与 stop 之间。
pub trait TestListener {
    fn on_start(&mut self, test: &TestIdentity);

    fn on_success(&mut self, test: &TestIdentity);

    /// 断言类失败
    fn on_failure(&mut self, test: &TestIdentity, failure: ExceptionInfo);

    /// 测试体抛出的意外错误
    fn on_error(&mut self, test: &TestIdentity, error: ExceptionInfo);

    /// 重复调用必须是无操作
    fn on_stop(&mut self, test: &TestIdentity);
}

/// 外部测试执行引擎
///
/// 引擎按顺序运行测试，并把每个测试的生命周期通知给收集器。
/// 测试代码的输出应写入 `collector.streams()`。
pub trait TestEngine {
    fn run(&mut self, collector: &mut ResultCollector);
}

impl<F> TestEngine for F
where
    F: FnMut(&mut ResultCollector),
{
    fn run(&mut self, collector: &mut ResultCollector) {
        self(collector)
    }
}
