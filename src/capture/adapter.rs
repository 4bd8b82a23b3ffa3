use crate::capture::types::{CaptureBuffer, CaptureInput, StreamKind};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use tracing::warn;

/// 当前写入目标
#[derive(Debug)]
enum Target {
    /// 直通真实控制台
    Console,
    /// 写入当前测试的缓冲区
    Buffer(CaptureBuffer),
}

/// 标准输出/标准错误的替身
///
/// 克隆得到的句柄共享同一个目标，测试代码持有任意一个句柄写入即可，
/// 目标在测试开始时被换成新缓冲区，结束时换回控制台。
/// 写入永远不会失败。
#[derive(Debug, Clone)]
pub struct StreamCapture {
    kind: StreamKind,
    target: Rc<RefCell<Target>>,
}

impl StreamCapture {
    pub fn new(kind: StreamKind) -> Self {
        Self {
            kind,
            target: Rc::new(RefCell::new(Target::Console)),
        }
    }

    pub fn kind(&self) -> StreamKind {
        self.kind
    }

    /// 是否正在捕获
    pub fn is_capturing(&self) -> bool {
        matches!(*self.target.borrow(), Target::Buffer(_))
    }

    /// 写入文本或字节
    pub fn write(&self, data: impl Into<CaptureInput>) {
        let text = data.into().into_text();
        self.write_str(&text);
    }

    /// 按顺序写入每个元素
    pub fn writelines<I, T>(&self, lines: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<CaptureInput>,
    {
        for line in lines {
            self.write(line);
        }
    }

    /// 刷新当前目标
    pub fn flush(&self) {
        if let Target::Console = *self.target.borrow() {
            let result = match self.kind {
                StreamKind::Stdout => io::stdout().flush(),
                StreamKind::Stderr => io::stderr().flush(),
            };
            if let Err(e) = result {
                warn!("Failed to flush {}: {}", self.kind.as_str(), e);
            }
        }
    }

    fn write_str(&self, text: &str) {
        match &mut *self.target.borrow_mut() {
            Target::Buffer(buffer) => buffer.push_str(text),
            Target::Console => {
                let result = match self.kind {
                    StreamKind::Stdout => io::stdout().write_all(text.as_bytes()),
                    StreamKind::Stderr => io::stderr().write_all(text.as_bytes()),
                };
                if let Err(e) = result {
                    warn!("Failed to write to {}: {}", self.kind.as_str(), e);
                }
            }
        }
    }

    /// 换上一个空缓冲区，返回之前未排空的内容（如果有）
    pub(crate) fn bind(&self) -> Option<CaptureBuffer> {
        let previous = self
            .target
            .replace(Target::Buffer(CaptureBuffer::new()));
        match previous {
            Target::Buffer(buffer) => Some(buffer),
            Target::Console => None,
        }
    }

    /// 换回控制台，返回缓冲区内容
    pub(crate) fn unbind(&self) -> CaptureBuffer {
        match self.target.replace(Target::Console) {
            Target::Buffer(buffer) => buffer,
            Target::Console => CaptureBuffer::new(),
        }
    }
}

impl Write for StreamCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        StreamCapture::write(self, buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        StreamCapture::flush(self);
        Ok(())
    }
}

/// 一对 stdout/stderr 替身，交给测试代码使用
#[derive(Debug, Clone)]
pub struct CaptureStreams {
    pub stdout: StreamCapture,
    pub stderr: StreamCapture,
}

impl CaptureStreams {
    pub fn new() -> Self {
        Self {
            stdout: StreamCapture::new(StreamKind::Stdout),
            stderr: StreamCapture::new(StreamKind::Stderr),
        }
    }
}

impl Default for CaptureStreams {
    fn default() -> Self {
        Self::new()
    }
}
