use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志系统
///
/// 支持通过 RUST_LOG 环境变量控制日志级别
/// 默认级别: warn
///
/// 日志写入 stderr，stdout 可能承载 XML 报告。
/// 重复调用是安全的，第二次起不做任何事。
///
/// 示例:
/// - RUST_LOG=debug cargo run --example sample_suite
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let installed = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!("Logger initialized");
    }
}
