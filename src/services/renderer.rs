//! 结构化文档渲染 - 业务能力层
//!
//! 纯函数：把 `StructuredDocument` 组装成固定顺序的片段。
//! 字段在提取时已经转义过，这里不再做任何转义。

use std::fmt::{self, Display};

use crate::models::StructuredDocument;
use crate::services::sanitizer::unescape_angle_brackets;

/// 片段中的一个区块
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    Header { title: String, source: Option<String> },
    Summary(String),
    KeyPoints(Vec<String>),
    CodeExamples(Vec<String>),
    RelatedContent(Vec<String>),
}

/// 渲染结果，不依赖任何界面
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    sections: Vec<Section>,
}

/// 按固定顺序渲染：标题、摘要、要点、代码示例、相关内容（后三者为空时省略）
pub fn render(doc: &StructuredDocument) -> Fragment {
    let mut sections = vec![
        Section::Header {
            title: doc.title.clone(),
            source: doc.source.as_ref().map(ToString::to_string),
        },
        Section::Summary(doc.summary.clone()),
    ];

    if !doc.key_points.is_empty() {
        sections.push(Section::KeyPoints(doc.key_points.clone()));
    }
    if !doc.code_examples.is_empty() {
        sections.push(Section::CodeExamples(doc.code_examples.clone()));
    }
    if !doc.related_content.is_empty() {
        sections.push(Section::RelatedContent(doc.related_content.clone()));
    }

    Fragment { sections }
}

impl Fragment {
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// 标记输出
    pub fn to_html(&self) -> String {
        let mut html = String::from(r#"<div class="docs-response">"#);
        for section in &self.sections {
            write_section_html(&mut html, section);
        }
        html.push_str("</div>");
        html
    }
}

fn write_section_html(html: &mut String, section: &Section) {
    match section {
        Section::Header { title, source } => {
            html.push_str(&format!(r#"<div class="docs-header"><h2>{}</h2>"#, title));
            if let Some(source) = source {
                html.push_str(&format!(r#"<div class="docs-source">{}</div>"#, source));
            }
            html.push_str("</div>");
        }
        Section::Summary(summary) => {
            html.push_str(&format!(
                r#"<div class="docs-summary"><h3>Summary</h3><p>{}</p></div>"#,
                summary
            ));
        }
        Section::KeyPoints(points) => {
            html.push_str(r#"<div class="docs-key-points"><h3>Key Points</h3>"#);
            push_list(html, points);
            html.push_str("</div>");
        }
        Section::CodeExamples(examples) => {
            html.push_str(r#"<div class="docs-code-examples"><h3>Code Examples</h3>"#);
            for code in examples {
                html.push_str(&format!(r#"<pre class="docs-code-block">{}</pre>"#, code));
            }
            html.push_str("</div>");
        }
        Section::RelatedContent(items) => {
            html.push_str(r#"<div class="docs-related"><h3>Related Content</h3>"#);
            push_list(html, items);
            html.push_str("</div>");
        }
    }
}

fn push_list(html: &mut String, items: &[String]) {
    html.push_str("<ul>");
    for item in items {
        html.push_str(&format!("<li>{}</li>", item));
    }
    html.push_str("</ul>");
}

/// 终端用的纯文本输出
impl Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match section {
                Section::Header { title, source } => {
                    writeln!(f, "{}", unescape_angle_brackets(title))?;
                    if let Some(source) = source {
                        writeln!(f, "{}", source)?;
                    }
                }
                Section::Summary(summary) => {
                    writeln!(f, "Summary")?;
                    writeln!(f, "{}", unescape_angle_brackets(summary))?;
                }
                Section::KeyPoints(points) => {
                    writeln!(f, "Key Points")?;
                    for point in points {
                        writeln!(f, "  • {}", unescape_angle_brackets(point))?;
                    }
                }
                Section::CodeExamples(examples) => {
                    writeln!(f, "Code Examples")?;
                    for code in examples {
                        for line in unescape_angle_brackets(code).lines() {
                            writeln!(f, "    {}", line)?;
                        }
                    }
                }
                Section::RelatedContent(items) => {
                    writeln!(f, "Related Content")?;
                    for item in items {
                        writeln!(f, "  • {}", unescape_angle_brackets(item))?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceAttribution;

    fn full_document() -> StructuredDocument {
        StructuredDocument {
            title: "Tracking Events".to_string(),
            summary: "How to send events.".to_string(),
            key_points: vec!["Use track()".to_string()],
            code_examples: vec!["analytics.track('x')".to_string()],
            related_content: vec!["Identify".to_string()],
            source: Some(SourceAttribution::new("segment", "tracking")),
        }
    }

    #[test]
    fn test_section_order() {
        let fragment = render(&full_document());
        let kinds: Vec<&str> = fragment
            .sections()
            .iter()
            .map(|s| match s {
                Section::Header { .. } => "header",
                Section::Summary(_) => "summary",
                Section::KeyPoints(_) => "key_points",
                Section::CodeExamples(_) => "code",
                Section::RelatedContent(_) => "related",
            })
            .collect();

        assert_eq!(kinds, vec!["header", "summary", "key_points", "code", "related"]);
    }

    #[test]
    fn test_empty_lists_omitted() {
        let doc = StructuredDocument {
            title: "Only".to_string(),
            summary: "Only".to_string(),
            ..Default::default()
        };
        let html = render(&doc).to_html();

        assert_eq!(render(&doc).sections().len(), 2);
        assert!(!html.contains("Key Points"));
        assert!(!html.contains("Code Examples"));
        assert!(!html.contains("Related Content"));
        assert!(!html.contains("docs-source"));
    }

    #[test]
    fn test_html_markup() {
        let html = render(&full_document()).to_html();

        assert!(html.starts_with(r#"<div class="docs-response"><div class="docs-header"><h2>Tracking Events</h2>"#));
        assert!(html.contains(r#"<div class="docs-source">Source: Segment Documentation (Tracking)</div>"#));
        assert!(html.contains("<h3>Summary</h3><p>How to send events.</p>"));
        assert!(html.contains("<ul><li>Use track()</li></ul>"));
        assert!(html.contains(r#"<pre class="docs-code-block">analytics.track('x')</pre>"#));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn test_no_extra_escaping() {
        let doc = StructuredDocument {
            title: "&lt;b&gt;".to_string(),
            ..Default::default()
        };
        let html = render(&doc).to_html();
        assert!(html.contains("<h2>&lt;b&gt;</h2>"));
        assert!(!html.contains("&amp;"));
    }

    #[test]
    fn test_plain_text_unescapes() {
        let doc = StructuredDocument {
            title: "Use &lt;div&gt;".to_string(),
            summary: "s".to_string(),
            ..Default::default()
        };
        let text = render(&doc).to_string();
        assert!(text.starts_with("Use <div>\n"));
        assert!(text.contains("Summary\ns\n"));
    }

    #[test]
    fn test_html_lists_and_code_blocks() {
        let doc = StructuredDocument {
            title: "T".to_string(),
            summary: "S".to_string(),
            key_points: vec!["a".to_string(), "b".to_string()],
            code_examples: vec!["x()".to_string(), "y()".to_string()],
            related_content: vec!["r".to_string()],
            source: None,
        };
        let html = render(&doc).to_html();

        assert!(html.contains("<h3>Key Points</h3><ul><li>a</li><li>b</li></ul></div>"));
        assert!(html.contains(r#"<pre class="docs-code-block">x()</pre><pre class="docs-code-block">y()</pre></div>"#));
        assert!(html.contains("<h3>Related Content</h3><ul><li>r</li></ul></div></div>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = full_document();
        assert_eq!(render(&doc).to_html(), render(&doc).to_html());
    }
}
