use std::fmt::Display;

use serde::Serialize;

use crate::error::ValidationError;

/// 默认的问题最大字符数
pub const MAX_QUESTION_CHARS: usize = 500;

/// 用户提出的问题
///
/// 构造时完成校验：去掉首尾空白后长度必须在 1..=上限 字符之间。
/// 校验失败的问题永远不会被发送。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Question(String);

impl Question {
    /// 使用默认上限（500 字符）校验
    pub fn new(text: &str) -> Result<Self, ValidationError> {
        Self::with_limit(text, MAX_QUESTION_CHARS)
    }

    pub fn with_limit(text: &str, max_chars: usize) -> Result<Self, ValidationError> {
        let trimmed = text.trim();
        let chars = trimmed.chars().count();

        if chars == 0 {
            return Err(ValidationError::Empty);
        }
        if chars > max_chars {
            return Err(ValidationError::TooLong { chars, max: max_chars });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
