pub mod builder;
pub mod types;
pub mod xml;

pub use builder::ReportBuilder;
pub use types::{ExceptionInfo, ReportProperty, RunSummary, TestIdentity, TestRecord, TestStatus};
