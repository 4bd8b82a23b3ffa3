pub mod adapter;
pub mod guard;
pub mod types;

pub use adapter::{CaptureStreams, StreamCapture};
pub use guard::CaptureGuard;
pub use types::{CaptureBuffer, CaptureInput, CapturedOutput, StreamKind};
