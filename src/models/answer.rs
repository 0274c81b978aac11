use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// 问答服务返回的回答
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerPayload {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl AnswerPayload {
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
            platform: None,
            section: None,
        }
    }

    /// 平台和章节都存在时才有来源说明
    pub fn source(&self) -> Option<SourceAttribution> {
        match (&self.platform, &self.section) {
            (Some(platform), Some(section)) => Some(SourceAttribution::new(platform, section)),
            _ => None,
        }
    }
}

/// 回答来源，如 `Source: Segment Documentation (Sources)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceAttribution {
    pub platform: String,
    pub section: String,
}

impl SourceAttribution {
    pub fn new(platform: &str, section: &str) -> Self {
        Self {
            platform: capitalize_first(platform),
            section: capitalize_first(section),
        }
    }
}

impl Display for SourceAttribution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Source: {} Documentation ({})", self.platform, self.section)
    }
}

/// 首字母大写，其余保持不变
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
