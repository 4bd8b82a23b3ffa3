use serde::{Deserialize, Serialize};
use std::any::Any;
use std::fmt;
use std::time::Duration;

/// 测试身份: 模块、类、方法名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TestIdentity {
    pub module: String,
    pub class: String,
    /// 完整 id 的最后一段
    pub name: String,
}

impl TestIdentity {
    /// `id` 可以是完整限定名（`pkg.mod.Class.test_x`），只保留最后一段
    pub fn new(module: impl Into<String>, class: impl Into<String>, id: &str) -> Self {
        let name = id.rsplit('.').next().unwrap_or(id).to_string();
        Self {
            module: module.into(),
            class: class.into(),
            name,
        }
    }

    /// 从 `module.Class.method` 形式解析，至少需要三段
    pub fn parse(qualified: &str) -> Option<Self> {
        let mut parts = qualified.rsplitn(3, '.');
        let name = parts.next()?;
        let class = parts.next()?;
        let module = parts.next()?;
        if name.is_empty() || class.is_empty() || module.is_empty() {
            return None;
        }
        Some(Self::new(module, class, name))
    }

    /// `module.Class`
    pub fn class_path(&self) -> String {
        format!("{}.{}", self.module, self.class)
    }
}

impl fmt::Display for TestIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}.{})", self.name, self.module, self.class)
    }
}

/// 测试结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestStatus {
    Passed,
    /// 断言失败
    Failed,
    /// 测试体抛出的意外错误
    Error,
}

impl TestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Passed => "Passed",
            TestStatus::Failed => "Failed",
            TestStatus::Error => "Error",
        }
    }

    /// 控制台跟踪行的标记
    pub fn tag(&self) -> &'static str {
        match self {
            TestStatus::Passed => "[OK]",
            TestStatus::Failed => "[F]",
            TestStatus::Error => "[E]",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 失败或错误的详情
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExceptionInfo {
    pub type_name: String,
    pub message: String,
    pub traceback: String,
}

impl ExceptionInfo {
    pub const ASSERTION: &'static str = "AssertionError";
    pub const PANIC: &'static str = "panic";

    /// traceback 默认为 `type: message`
    pub fn new(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let message = message.into();
        let traceback = format!("{}: {}", type_name, message);
        Self {
            type_name,
            message,
            traceback,
        }
    }

    pub fn assertion(message: impl Into<String>) -> Self {
        Self::new(Self::ASSERTION, message)
    }

    pub fn with_traceback(mut self, traceback: impl Into<String>) -> Self {
        self.traceback = traceback.into();
        self
    }

    /// 从 `catch_unwind` 的 payload 构造
    pub fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };
        Self::new(Self::PANIC, message)
    }
}

impl fmt::Display for ExceptionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.message)
    }
}

impl std::error::Error for ExceptionInfo {}

/// 单个测试的最终记录，创建后不再修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    /// `module.Class`
    pub class_path: String,
    pub case_name: String,
    pub status: TestStatus,
    pub elapsed: Duration,
    pub stdout: String,
    pub stderr: String,
    /// 仅 Failed/Error 有值
    pub failure: Option<ExceptionInfo>,
}

/// 报告中的运行级元数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportProperty {
    pub name: String,
    pub value: String,
}

impl ReportProperty {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// 运行统计，总是从记录中计算
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl RunSummary {
    pub fn from_records(records: &[TestRecord]) -> Self {
        let count = |status: TestStatus| records.iter().filter(|r| r.status == status).count();
        Self {
            passed: count(TestStatus::Passed),
            failed: count(TestStatus::Failed),
            errors: count(TestStatus::Error),
        }
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errors
    }

    /// 没有失败也没有错误
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}
