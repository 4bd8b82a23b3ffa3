use crate::capture::adapter::CaptureStreams;
use crate::capture::types::CapturedOutput;
use tracing::{debug, warn};

/// 一次测试期间的捕获作用域
///
/// `acquire` 把两个流换到新缓冲区，`release` 排空并换回控制台。
/// 未调用 `release` 就被丢弃时，`Drop` 负责换回控制台。
/// 同一时刻只能有一个活动的 guard。
#[derive(Debug)]
pub struct CaptureGuard {
    streams: CaptureStreams,
    released: bool,
}

impl CaptureGuard {
    pub fn acquire(streams: &CaptureStreams) -> Self {
        let stale_out = streams.stdout.bind();
        let stale_err = streams.stderr.bind();
        if stale_out.is_some() || stale_err.is_some() {
            warn!("Capture was already active; discarding output of the previous capture");
        }
        debug!("Capture acquired");

        Self {
            streams: streams.clone(),
            released: false,
        }
    }

    /// 排空缓冲区并恢复控制台
    pub fn release(mut self) -> CapturedOutput {
        self.released = true;
        self.drain()
    }

    fn drain(&self) -> CapturedOutput {
        let stdout = self.streams.stdout.unbind().into_string();
        let stderr = self.streams.stderr.unbind().into_string();
        debug!(
            stdout_len = stdout.len(),
            stderr_len = stderr.len(),
            "Capture released"
        );
        CapturedOutput { stdout, stderr }
    }
}

impl Drop for CaptureGuard {
    fn drop(&mut self) {
        if !self.released {
            let _ = self.drain();
        }
    }
}
