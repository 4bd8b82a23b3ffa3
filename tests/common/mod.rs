#![allow(dead_code)]

use quick_xml::Reader;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;
use xmltest::runner::ConsoleReporter;
use xmltest::{ExecutorConfig, OutputSink, RunResult, TestEngine, XmlTestExecutor};

/// 解析后的 XML 元素
#[derive(Debug, Default)]
pub struct Element {
    pub name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }
}

fn element_from(start: &BytesStart<'_>) -> Element {
    let name = String::from_utf8(start.name().as_ref().to_vec()).unwrap();
    let attrs = start
        .attributes()
        .map(|attr| {
            let attr = attr.unwrap();
            let key = String::from_utf8(attr.key.as_ref().to_vec()).unwrap();
            let raw = std::str::from_utf8(&attr.value).unwrap();
            let value = unescape(&normalize_attr(raw)).unwrap().into_owned();
            (key, value)
        })
        .collect();
    Element {
        name,
        attrs,
        ..Element::default()
    }
}

/// 行尾规范化: 字面 `\r\n` 和 `\r` 都变成 `\n`
fn normalize_line_ends(raw: &str) -> String {
    raw.replace("\r\n", "\n").replace('\r', "\n")
}

/// 属性值规范化: 字面空白字符都变成空格（字符引用不受影响）
fn normalize_attr(raw: &str) -> String {
    normalize_line_ends(raw).replace(&['\t', '\n'][..], " ")
}

/// 解析文档并返回根元素，文档不合法时 panic
///
/// 和标准解析器一样先做行尾与属性值规范化，再解析实体。
pub fn parse_xml(xml: &str) -> Element {
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![Element::default()];

    loop {
        match reader.read_event().expect("report should be well-formed XML") {
            Event::Start(start) => stack.push(element_from(&start)),
            Event::Empty(start) => {
                let element = element_from(&start);
                stack.last_mut().unwrap().children.push(element);
            }
            Event::End(_) => {
                let element = stack.pop().unwrap();
                stack.last_mut().unwrap().children.push(element);
            }
            Event::Text(text) => {
                let raw = std::str::from_utf8(&text).unwrap();
                let text = unescape(&normalize_line_ends(raw)).unwrap().into_owned();
                stack.last_mut().unwrap().text.push_str(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    assert_eq!(stack.len(), 1, "unclosed elements");
    let mut document = stack.pop().unwrap();
    assert_eq!(document.children.len(), 1, "expected a single root element");
    document.children.remove(0)
}

/// 可共享的内存写入器
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// 用内存输出端运行引擎
pub fn run_in_memory<E: TestEngine>(config: ExecutorConfig, engine: &mut E) -> (RunResult, String) {
    let buffer = SharedBuffer::default();
    let config = config.with_output(OutputSink::Writer(Box::new(buffer.clone())));
    let mut executor = XmlTestExecutor::new(config).with_reporter(ConsoleReporter::new(false));
    let result = executor.run(engine).unwrap();
    (result, buffer.contents())
}
