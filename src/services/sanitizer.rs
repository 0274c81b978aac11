//! 文本转义
//!
//! 不可信文本嵌入标记前必须经过这里。

use std::borrow::Cow;

/// 只转义 `<` 和 `>`
///
/// 不处理 `&`，所以已经转义过的 `&lt;` / `&gt;` 再次经过时保持不变。
pub fn escape_angle_brackets(text: &str) -> Cow<'_, str> {
    if !text.contains(|c| c == '<' || c == '>') {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// 还原 `escape_angle_brackets` 的结果，用于纯文本输出
pub fn unescape_angle_brackets(text: &str) -> String {
    text.replace("&lt;", "<").replace("&gt;", ">")
}

/// 完整的 HTML 文本转义，用于回显用户输入
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
