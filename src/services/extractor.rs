//! 文档结构提取 - 业务能力层
//!
//! 从回答文本中启发式地提取标题、摘要、要点、代码示例和相关内容。
//! 每个字段是一次独立的扫描，互不共享状态，结果只是尽力而为。

use std::sync::LazyLock;

use phf::phf_set;
use regex::Regex;

use crate::models::{AnswerPayload, SourceAttribution, StructuredDocument};
use crate::services::sanitizer::escape_angle_brackets;
use crate::utils::truncate_text;

/// 文本为空时的标题
pub const DEFAULT_TITLE: &str = "Documentation Overview";
/// 摘要的字符上限
pub const SUMMARY_MAX_CHARS: usize = 300;
/// 要点的数量上限
pub const MAX_KEY_POINTS: usize = 5;

const UPPERCASE_MIN_CHARS: usize = 10;
const KEYWORD_LINE_MAX_CHARS: usize = 150;
const RELATED_LINE_MAX_CHARS: usize = 100;

static KEY_POINT_KEYWORDS: phf::Set<&'static str> = phf_set! {
    "important",
    "note",
    "key",
    "remember",
    "crucial",
};

static HEADING_MARKER: LazyLock<Regex> = LazyLock::new(|| compile(r"^#{1,6}\s*"));
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| compile(r"\n[ \t]*\n"));
static LIST_ITEM: LazyLock<Regex> = LazyLock::new(|| compile(r"^(?:[-*•]|\d+\.)\s+(.*)$"));
static H2_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"^##\s+(.*)$"));
static CODE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?s)```(.*?)```|`([^`\n]+)`"));
static FENCE_TAG: LazyLock<Regex> = LazyLock::new(|| compile(r"^[A-Za-z0-9_+-]*$"));
static RELATED_TRIGGER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)related\s+content|see\s+also"));
static MARKDOWN_HEADING: LazyLock<Regex> = LazyLock::new(|| compile(r"^\s*#"));

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => panic!("内置提取规则无法编译 ({}): {}", pattern, e),
    }
}

/// 从回答文本提取结构化文档
///
/// 不会失败：缺少的结构对应空字段。输入先转义尖括号，
/// 所以各字段可以直接嵌入标记。
pub fn extract(raw_text: &str, platform: Option<&str>, section: Option<&str>) -> StructuredDocument {
    let escaped = escape_angle_brackets(raw_text);
    let text = escaped.trim();

    let source = match (platform, section) {
        (Some(platform), Some(section)) => Some(SourceAttribution::new(platform, section)),
        _ => None,
    };

    StructuredDocument {
        title: extract_title(text),
        summary: extract_summary(text),
        key_points: extract_key_points(text),
        code_examples: extract_code_examples(text),
        related_content: extract_related_content(text),
        source,
    }
}

pub fn extract_answer(payload: &AnswerPayload) -> StructuredDocument {
    extract(
        &payload.answer,
        payload.platform.as_deref(),
        payload.section.as_deref(),
    )
}

/// 第一行，去掉开头的 `#` 标题标记
fn extract_title(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or("").trim();
    let title = HEADING_MARKER.replace(first_line, "");
    let title = title.trim();

    if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        title.to_string()
    }
}

/// 第一个段落，超过 300 字符硬截断
fn extract_summary(text: &str) -> String {
    let first_paragraph = PARAGRAPH_BREAK.split(text).next().unwrap_or("").trim();
    truncate_text(first_paragraph, SUMMARY_MAX_CHARS)
}

fn extract_key_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter_map(key_point)
        .take(MAX_KEY_POINTS)
        .collect()
}

fn key_point(line: &str) -> Option<String> {
    if let Some(caps) = LIST_ITEM.captures(line) {
        return Some(caps[1].trim().to_string());
    }
    if let Some(caps) = H2_HEADING.captures(line) {
        return Some(caps[1].trim().to_string());
    }
    if is_shouting(line) {
        return Some(line.to_string());
    }
    if line.chars().count() < KEYWORD_LINE_MAX_CHARS && has_keyword(line) {
        return Some(line.to_string());
    }
    None
}

/// 全大写且超过 10 个字符（至少含一个字母）
fn is_shouting(line: &str) -> bool {
    line.chars().count() > UPPERCASE_MIN_CHARS
        && line.chars().any(char::is_alphabetic)
        && !line.chars().any(char::is_lowercase)
}

fn has_keyword(line: &str) -> bool {
    line.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .any(|word| KEY_POINT_KEYWORDS.contains(word.to_lowercase().as_str()))
}

/// 先匹配 ``` 代码块，块外再匹配行内代码
fn extract_code_examples(text: &str) -> Vec<String> {
    CODE.captures_iter(text)
        .filter_map(|caps| {
            let code = match (caps.get(1), caps.get(2)) {
                (Some(block), _) => strip_fence_tag(block.as_str()),
                (None, Some(inline)) => inline.as_str(),
                (None, None) => return None,
            };
            let code = code.trim();
            (!code.is_empty()).then(|| code.to_string())
        })
        .collect()
}

/// 去掉 ```js 这类语言标记所在的首行
fn strip_fence_tag(block: &str) -> &str {
    match block.split_once('\n') {
        Some((first, rest)) if FENCE_TAG.is_match(first.trim()) => rest,
        _ => block,
    }
}

/// 按行扫描的状态机：遇到触发行进入相关模式，空行退出
fn extract_related_content(text: &str) -> Vec<String> {
    let mut related = Vec::new();
    let mut in_related = false;

    for line in text.lines() {
        if RELATED_TRIGGER.is_match(line) {
            in_related = true;
        } else if line.trim().is_empty() {
            in_related = false;
        } else if in_related
            && !MARKDOWN_HEADING.is_match(line)
            && line.chars().count() < RELATED_LINE_MAX_CHARS
        {
            related.push(line.trim().to_string());
        }
    }

    related
}
