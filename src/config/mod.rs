pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, parse_property};
pub use types::{DEFAULT_REPORT_NAME, ExecutorConfig, FileConfig, OutputSink};
