use crate::capture::CapturedOutput;
use crate::report::types::{
    ExceptionInfo, ReportProperty, RunSummary, TestIdentity, TestRecord, TestStatus,
};
use crate::report::xml;
use std::time::Duration;

/// 按执行顺序累积测试记录并渲染 XML 报告
#[derive(Debug, Default, Clone)]
pub struct ReportBuilder {
    records: Vec<TestRecord>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_passed(&mut self, test: &TestIdentity, elapsed: Duration, output: CapturedOutput) {
        self.push(test, TestStatus::Passed, elapsed, None, output);
    }

    pub fn record_failed(
        &mut self,
        test: &TestIdentity,
        elapsed: Duration,
        failure: ExceptionInfo,
        output: CapturedOutput,
    ) {
        self.push(test, TestStatus::Failed, elapsed, Some(failure), output);
    }

    pub fn record_error(
        &mut self,
        test: &TestIdentity,
        elapsed: Duration,
        error: ExceptionInfo,
        output: CapturedOutput,
    ) {
        self.push(test, TestStatus::Error, elapsed, Some(error), output);
    }

    fn push(
        &mut self,
        test: &TestIdentity,
        status: TestStatus,
        elapsed: Duration,
        failure: Option<ExceptionInfo>,
        output: CapturedOutput,
    ) {
        self.records.push(TestRecord {
            class_path: test.class_path(),
            case_name: test.name.clone(),
            status,
            elapsed,
            stdout: output.stdout,
            stderr: output.stderr,
            failure,
        });
    }

    /// 已记录的测试，按执行顺序
    pub fn records(&self) -> &[TestRecord] {
        &self.records
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary::from_records(&self.records)
    }

    /// 渲染完整的 XML 文档
    pub fn render(&self, name: &str, total: Duration, properties: &[ReportProperty]) -> String {
        let testcases: Vec<String> = self.records.iter().map(xml::render_testcase).collect();
        xml::render_document(name, total, &self.summary(), properties, &testcases)
    }
}
