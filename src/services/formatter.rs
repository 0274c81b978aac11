//! 行内格式化 - 业务能力层
//!
//! 把松散标记的纯文本按固定顺序的规则转换成行内标记片段。
//!
//! 规则顺序不可调整：后面的规则会作用在前面规则插入的标记上，
//! 段落切分必须最后执行，才不会拆散前面生成的多行块。

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::services::sanitizer::escape_angle_brackets;

const LINK_ATTRS: &str = r#"target="_blank" rel="noopener noreferrer""#;

/// 已生成的链接和代码，裸 URL 规则不进入
const INLINE_REGIONS: &str = r"(?s)<a\s[^>]*>.*?</a>|<code\b[^>]*>.*?</code>|<pre\b[^>]*>.*?</pre>";
/// 多行代码块，段落切分不进入
const CODE_BLOCKS: &str = r"(?s)<pre\b[^>]*>.*?</pre>";

/// 替换方式
enum Rewrite {
    /// `regex` 替换模板
    Template(&'static str),
    /// 需要判断上下文的替换
    With(fn(&Captures<'_>) -> String),
}

/// 一条格式化规则
struct FormattingRule {
    name: &'static str,
    pattern: Regex,
    rewrite: Rewrite,
    /// 命中的区域原样保留，规则只作用于区域之外
    skip: Option<Regex>,
}

impl FormattingRule {
    fn template(name: &'static str, pattern: &str, template: &'static str) -> Self {
        Self {
            name,
            pattern: compile(pattern),
            rewrite: Rewrite::Template(template),
            skip: None,
        }
    }

    fn with(name: &'static str, pattern: &str, rewrite: fn(&Captures<'_>) -> String) -> Self {
        Self {
            name,
            pattern: compile(pattern),
            rewrite: Rewrite::With(rewrite),
            skip: None,
        }
    }

    fn outside(mut self, protected: &str) -> Self {
        self.skip = Some(compile(protected));
        self
    }

    fn apply(&self, text: &str) -> String {
        let Some(skip) = &self.skip else {
            return self.rewrite(text);
        };

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for region in skip.find_iter(text) {
            out.push_str(&self.rewrite(&text[last..region.start()]));
            out.push_str(region.as_str());
            last = region.end();
        }
        out.push_str(&self.rewrite(&text[last..]));
        out
    }

    fn rewrite(&self, text: &str) -> String {
        match &self.rewrite {
            Rewrite::Template(template) => self.pattern.replace_all(text, *template).into_owned(),
            Rewrite::With(rewrite) => self
                .pattern
                .replace_all(text, |caps: &Captures<'_>| rewrite(caps))
                .into_owned(),
        }
    }
}

fn compile(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(re) => re,
        Err(e) => panic!("内置格式化规则无法编译 ({}): {}", pattern, e),
    }
}

/// 转义之后的规则，按执行顺序排列
static RULES: LazyLock<Vec<FormattingRule>> = LazyLock::new(|| {
    vec![
        FormattingRule::template(
            "fenced_code",
            r"```([^`]+)```",
            r#"<pre class="docs-code-block">${1}</pre>"#,
        ),
        FormattingRule::template(
            "inline_code",
            r"`([^`\n]+)`",
            r#"<code class="docs-code">${1}</code>"#,
        ),
        FormattingRule::template(
            "section_header",
            r"---[ \t]*([A-Z][A-Za-z0-9 _]+?)[ \t]*---",
            r#"<h3 class="docs-section-header">${1}</h3>"#,
        ),
        FormattingRule::with(
            "subsection_label",
            r"(?m)^([A-Z][A-Za-z0-9 _]*[A-Za-z0-9_]:)([ \t]|$)",
            subsection_label,
        ),
        FormattingRule::template(
            "numbered_step",
            r"(?m)^[ \t]*(\d+)\.[ \t]+([^\n]+)",
            r#"<div class="docs-step"><span class="step-number">${1}.</span> ${2}</div>"#,
        ),
        FormattingRule::template(
            "note",
            r"(?m)^[ \t]*Note:[ \t]*([^\n]+)",
            r#"<div class="docs-note"><span class="note-icon">ℹ️</span> ${1}</div>"#,
        ),
        FormattingRule::template(
            "warning",
            r"(?m)^[ \t]*Warning:[ \t]*([^\n]+)",
            r#"<div class="docs-warning"><span class="warning-icon">⚠️</span> ${1}</div>"#,
        ),
        FormattingRule::with("markdown_link", r#"\[([^\]\n]+)\]\(([^)\s"]+)\)"#, |caps| {
            anchor(&caps[2], &caps[1])
        }),
        FormattingRule::with("bare_url", r#"https?://[^\s<"]+"#, bare_url).outside(INLINE_REGIONS),
        FormattingRule::template("paragraph", r"\n[ \t]*\n\s*", "</p><p>").outside(CODE_BLOCKS),
    ]
});

/// 把回答文本转换成行内标记片段
///
/// 全函数：不会失败，空白输入返回空串。
pub fn format(raw_text: &str) -> String {
    if raw_text.trim().is_empty() {
        return String::new();
    }

    let mut formatted = escape_angle_brackets(raw_text).into_owned();
    for rule in RULES.iter() {
        formatted = rule.apply(&formatted);
    }

    if !formatted.starts_with("<p>") {
        formatted = format!("<p>{}</p>", formatted);
    }
    formatted
}

/// 规则名称，按执行顺序（含第一步转义）
pub fn rule_names() -> Vec<&'static str> {
    std::iter::once("escape")
        .chain(RULES.iter().map(|rule| rule.name))
        .collect()
}

fn anchor(href: &str, text: &str) -> String {
    format!(r#"<a href="{}" {}>{}</a>"#, href, LINK_ATTRS, text)
}

/// 冒号后必须是空白或行尾，`https:` 这类不算标签；Note / Warning 由各自的规则处理
fn subsection_label(caps: &Captures<'_>) -> String {
    let (label, after) = (&caps[1], &caps[2]);
    if label == "Note:" || label == "Warning:" {
        return caps[0].to_string();
    }
    format!(r#"<h4 class="docs-subsection-header">{}</h4>{}"#, label, after)
}

fn bare_url(caps: &Captures<'_>) -> String {
    let raw = &caps[0];
    let cut = [raw.find("&lt;"), raw.find("&gt;")]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(raw.len());
    let (candidate, rest) = raw.split_at(cut);
    let url = candidate.trim_end_matches(&['.', ',', ';', ':', '!', '?', ')'][..]);
    if url.ends_with("://") {
        return raw.to_string();
    }
    let trailing = &candidate[url.len()..];

    format!("{}{}{}", anchor(url, url), trailing, rest)
}
