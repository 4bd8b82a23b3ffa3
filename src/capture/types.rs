use std::borrow::Cow;
use std::fmt::Write as _;

/// 标准流种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

impl StreamKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamKind::Stdout => "stdout",
            StreamKind::Stderr => "stderr",
        }
    }
}

/// 写入捕获流的数据
///
/// 文本原样写入；字节在写入前宽松解码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureInput {
    Text(String),
    Bytes(Vec<u8>),
}

impl CaptureInput {
    /// 转为文本，永不失败
    pub fn into_text(self) -> String {
        match self {
            CaptureInput::Text(text) => text,
            CaptureInput::Bytes(bytes) => decode_lenient(&bytes).into_owned(),
        }
    }
}

impl From<&str> for CaptureInput {
    fn from(s: &str) -> Self {
        CaptureInput::Text(s.to_string())
    }
}

impl From<String> for CaptureInput {
    fn from(s: String) -> Self {
        CaptureInput::Text(s)
    }
}

impl From<&String> for CaptureInput {
    fn from(s: &String) -> Self {
        CaptureInput::Text(s.clone())
    }
}

impl From<&[u8]> for CaptureInput {
    fn from(bytes: &[u8]) -> Self {
        CaptureInput::Bytes(bytes.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for CaptureInput {
    fn from(bytes: &[u8; N]) -> Self {
        CaptureInput::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for CaptureInput {
    fn from(bytes: Vec<u8>) -> Self {
        CaptureInput::Bytes(bytes)
    }
}

/// 宽松 UTF-8 解码
///
/// 合法片段原样保留，非法字节输出为 `\xNN` 字面文本。
pub fn decode_lenient(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }

    tracing::debug!(len = bytes.len(), "captured bytes are not valid UTF-8, escaping");

    let mut out = String::with_capacity(bytes.len() + 8);
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        for byte in chunk.invalid() {
            // String 的 fmt::Write 不会失败
            let _ = write!(out, "\\x{:02x}", byte);
        }
    }
    Cow::Owned(out)
}

/// 单个测试、单个流的捕获缓冲区
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CaptureBuffer {
    text: String,
}

impl CaptureBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// 一个测试结束后排空的 stdout/stderr 内容
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CapturedOutput {
    pub stdout: String,
    pub stderr: String,
}

impl CapturedOutput {
    pub fn new(stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }
}
