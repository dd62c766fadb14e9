//! 日志工具模块
//!
//! 日志统一写到 stderr，stdout 留给答题界面

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// 初始化日志
///
/// `RUST_LOG` 优先；未设置时默认 `warn`，开启详细日志时为 `debug`
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, command: &str) {
    info!("{}", "=".repeat(60));
    info!(
        "🚀 pdf_quiz 启动 - {} ({})",
        command,
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("📁 会话文件: {}", config.session_file);
    info!(
        "🎲 选项模式: {}",
        if config.reshuffle_options {
            "每次重新随机"
        } else {
            "固定"
        }
    );
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
