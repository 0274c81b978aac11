//! 回答展示 - 业务能力层
//!
//! 根据展示方式选择行内路径（只经过 Formatter）或结构化路径
//! （Extractor + Renderer）。

use std::fmt::{self, Display};

use crate::config::RenderMode;
use crate::models::{AnswerPayload, SourceAttribution};
use crate::services::sanitizer::escape_html;
use crate::services::{extractor, formatter, renderer};
use crate::services::renderer::Fragment;

/// 交给展示层的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Presentation {
    Inline {
        markup: String,
        source: Option<SourceAttribution>,
    },
    /// 来源信息已经包含在片段头部
    Structured(Fragment),
}

pub fn present(payload: &AnswerPayload, mode: RenderMode) -> Presentation {
    match mode {
        RenderMode::Inline => Presentation::Inline {
            markup: formatter::format(&payload.answer),
            source: payload.source(),
        },
        RenderMode::Structured => {
            let doc = extractor::extract_answer(payload);
            Presentation::Structured(renderer::render(&doc))
        }
    }
}

/// 用户自己的问题回显，完整转义
pub fn user_message(text: &str) -> String {
    format!("<p>{}</p>", escape_html(text))
}

impl Presentation {
    /// 完整的标记片段
    pub fn to_markup(&self) -> String {
        match self {
            Presentation::Inline { markup, source } => match source {
                Some(source) => format!(
                    r#"{}<div class="message-metadata">{}</div>"#,
                    markup, source
                ),
                None => markup.clone(),
            },
            Presentation::Structured(fragment) => fragment.to_html(),
        }
    }

    pub fn source_line(&self) -> Option<String> {
        match self {
            Presentation::Inline { source, .. } => source.as_ref().map(ToString::to_string),
            Presentation::Structured(_) => None,
        }
    }
}

impl Display for Presentation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Presentation::Inline { markup, source } => {
                writeln!(f, "{}", markup)?;
                if let Some(source) = source {
                    writeln!(f, "{}", source)?;
                }
                Ok(())
            }
            Presentation::Structured(fragment) => write!(f, "{}", fragment),
        }
    }
}
