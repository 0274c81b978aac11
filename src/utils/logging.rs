/// 日志工具模块
///
/// 提供日志格式化和输出的辅助函数
use tracing::info;

use crate::config::Config;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 文档问答客户端启动");
    info!("🌐 服务地址: {}", config.api_base_url);
    info!(
        "⏱️ 单次超时: {}ms | 最多尝试: {} 次 | 退避基数: {}ms",
        config.request_timeout_ms, config.max_attempts, config.retry_base_delay_ms
    );
    info!("🖼️ 展示方式: {:?}", config.render_mode);
    info!("{}", "=".repeat(60));
}

/// 截断长文本
///
/// 按字符数硬截断（不考虑单词边界），超出时追加 `...`。
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars_not_bytes() {
        assert_eq!(truncate_text("文档问答", 2), "文档...");
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("exact", 5), "exact");
    }
}
