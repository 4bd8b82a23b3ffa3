pub mod collector;
pub mod executor;
pub mod listener;
pub mod panic;
pub mod reporter;
pub mod suite;

pub use collector::ResultCollector;
pub use executor::{RunResult, XmlTestExecutor};
pub use listener::{TestEngine, TestListener};
pub use reporter::ConsoleReporter;
pub use suite::{SuiteRunner, TestBody, TestCase};
