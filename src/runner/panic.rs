//! 捕获测试体中的 panic
//!
//! panic hook 只安装一次。在 [`catch_panic`] 内部的线程上，hook 记录位置和回溯，
//! 不向控制台打印；其他线程仍交给原来的 hook。

use crate::report::ExceptionInfo;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

/// panic hook 记录的信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanicDetail {
    /// `file:line:column`
    pub location: Option<String>,
    /// 仅在 RUST_BACKTRACE 开启时存在
    pub backtrace: Option<String>,
}

impl PanicDetail {
    /// 在 `head` 之后追加位置和回溯
    pub fn traceback(&self, head: &str) -> String {
        let mut traceback = head.to_string();
        if let Some(location) = &self.location {
            traceback.push_str("\n  at ");
            traceback.push_str(location);
        }
        if let Some(backtrace) = &self.backtrace {
            traceback.push_str("\n\nstack backtrace:\n");
            traceback.push_str(backtrace);
        }
        traceback
    }
}

thread_local! {
    static CATCHING: Cell<bool> = const { Cell::new(false) };
    static LAST_PANIC: RefCell<Option<PanicDetail>> = const { RefCell::new(None) };
}

static INSTALL_HOOK: Once = Once::new();

fn install_hook() {
    INSTALL_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info: &panic::PanicHookInfo<'_>| {
            if !CATCHING.with(Cell::get) {
                previous(info);
                return;
            }

            let location = info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
            let backtrace = Backtrace::capture();
            let backtrace =
                (backtrace.status() == BacktraceStatus::Captured).then(|| backtrace.to_string());

            LAST_PANIC.with(|slot| {
                *slot.borrow_mut() = Some(PanicDetail {
                    location,
                    backtrace,
                })
            });
        }));
    });
}

/// 运行 `f`，panic 时转为类型为 `panic` 的 [`ExceptionInfo`]
///
/// traceback 包含 panic 消息、位置以及（如果开启）回溯。
pub fn catch_panic<R>(f: impl FnOnce() -> R) -> Result<R, ExceptionInfo> {
    install_hook();
    LAST_PANIC.with(|slot| slot.borrow_mut().take());

    let was_catching = CATCHING.with(|c| c.replace(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    CATCHING.with(|c| c.set(was_catching));

    result.map_err(|payload| {
        let detail = LAST_PANIC
            .with(|slot| slot.borrow_mut().take())
            .unwrap_or_default();
        let info = ExceptionInfo::from_panic(payload);
        let traceback = detail.traceback(&info.traceback);
        info.with_traceback(traceback)
    })
}
