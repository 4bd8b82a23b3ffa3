pub mod capture;
pub mod config;
pub mod error;
pub mod logger;
pub mod program;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use capture::{CaptureInput, CaptureStreams, StreamCapture};
pub use config::{ExecutorConfig, OutputSink};
pub use error::{Result, XmlTestError};
pub use program::TestProgram;
pub use report::{ExceptionInfo, ReportBuilder, ReportProperty, TestIdentity, TestStatus};
pub use runner::{ResultCollector, RunResult, SuiteRunner, TestEngine, TestListener, XmlTestExecutor};
