//! JUnit 风格 XML 片段渲染
//!
//! 所有注入的自由文本都先经过 [`sanitize`] 再转义，
//! 捕获到的输出和异常消息可能包含任意字符。

use crate::report::types::{ReportProperty, RunSummary, TestRecord, TestStatus};
use quick_xml::escape::{escape, partial_escape};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::time::Duration;

pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

const INDENT: &str = "  ";

/// 替换 XML 1.0 中不允许出现的字符
///
/// 控制字符输出为 `\xNN`，U+FFFE/U+FFFF 输出为 `\u{...}`。
pub fn sanitize(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if is_xml_char(c) {
            out.push(c);
        } else if (c as u32) < 0x20 {
            let _ = write!(out, "\\x{:02x}", c as u32);
        } else {
            let _ = write!(out, "\\u{{{:x}}}", c as u32);
        }
    }
    Cow::Owned(out)
}

fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

/// 元素内容转义（`&`、`<`、`>`）
///
/// `\r` 输出为字符引用，否则解析器会按行尾规范化把它吞掉。
pub fn escape_text(text: &str) -> String {
    let sanitized = sanitize(text);
    let escaped = partial_escape(&*sanitized);
    if escaped.contains('\r') {
        escaped.replace('\r', "&#13;")
    } else {
        escaped.into_owned()
    }
}

/// 属性值转义，额外转义引号
///
/// 换行、回车、制表符输出为字符引用，属性值规范化会把它们变成空格。
pub fn escape_attr(value: &str) -> String {
    let sanitized = sanitize(value);
    let escaped = escape(&*sanitized);
    if !escaped.contains(&['\t', '\n', '\r'][..]) {
        return escaped.into_owned();
    }

    let mut out = String::with_capacity(escaped.len() + 8);
    for c in escaped.chars() {
        match c {
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(c),
        }
    }
    out
}

/// `time` 属性: 秒，保留 6 位小数
pub fn format_duration(duration: Duration) -> String {
    format!("{:.6}", duration.as_secs_f64())
}

/// 渲染单个 `testcase` 元素（含缩进和结尾换行）
pub fn render_testcase(record: &TestRecord) -> String {
    let pad = INDENT.repeat(2);
    let inner = INDENT.repeat(3);
    let mut out = String::new();

    let _ = writeln!(
        out,
        r#"{pad}<testcase classname="{}" name="{}" status="{}" time="{}">"#,
        escape_attr(&record.class_path),
        escape_attr(&record.case_name),
        record.status.as_str(),
        format_duration(record.elapsed),
    );

    if !record.stdout.is_empty() {
        let _ = writeln!(
            out,
            "{inner}<system-out>{}</system-out>",
            escape_text(&record.stdout)
        );
    }
    if !record.stderr.is_empty() {
        let _ = writeln!(
            out,
            "{inner}<system-err>{}</system-err>",
            escape_text(&record.stderr)
        );
    }

    let element = match record.status {
        TestStatus::Passed => None,
        TestStatus::Failed => Some("failure"),
        TestStatus::Error => Some("error"),
    };
    if let (Some(element), Some(info)) = (element, &record.failure) {
        let _ = writeln!(
            out,
            r#"{inner}<{element} message="{}" type="{}">{}</{element}>"#,
            escape_attr(&info.message),
            escape_attr(&info.type_name),
            escape_text(&info.traceback),
        );
    }

    let _ = writeln!(out, "{pad}</testcase>");
    out
}

/// 渲染 `properties` 块，没有属性时返回空字符串
pub fn render_properties(properties: &[ReportProperty]) -> String {
    if properties.is_empty() {
        return String::new();
    }

    let pad = INDENT.repeat(2);
    let inner = INDENT.repeat(3);
    let mut out = String::new();
    let _ = writeln!(out, "{pad}<properties>");
    for property in properties {
        let _ = writeln!(
            out,
            r#"{inner}<property name="{}" value="{}"/>"#,
            escape_attr(&property.name),
            escape_attr(&property.value),
        );
    }
    let _ = writeln!(out, "{pad}</properties>");
    out
}

/// 渲染完整文档
pub fn render_document(
    name: &str,
    total: Duration,
    summary: &RunSummary,
    properties: &[ReportProperty],
    testcases: &[String],
) -> String {
    let name = escape_attr(name);
    let mut out = String::new();

    let _ = writeln!(out, "{XML_DECLARATION}");
    let _ = writeln!(
        out,
        r#"<testsuites errors="{}" failures="{}" name="{}" tests="{}" time="{}">"#,
        summary.errors,
        summary.failed,
        name,
        summary.total(),
        format_duration(total),
    );
    let _ = writeln!(
        out,
        r#"{INDENT}<testsuite errors="{}" failures="{}" name="{}" tests="{}" >"#,
        summary.errors,
        summary.failed,
        name,
        summary.total(),
    );
    out.push_str(&render_properties(properties));
    for testcase in testcases {
        out.push_str(testcase);
    }
    let _ = writeln!(out, "{INDENT}</testsuite>");
    let _ = writeln!(out, "</testsuites>");
    out
}
