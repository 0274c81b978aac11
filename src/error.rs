use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 提问流程错误
    #[error("提问错误: {0}")]
    Ask(#[from] AskError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 终端读写错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

/// 问题校验错误（从不发出网络请求）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 问题为空
    #[error("问题不能为空")]
    Empty,
    /// 问题过长
    #[error("问题过长: {chars} 字符 (上限 {max})")]
    TooLong { chars: usize, max: usize },
}

/// 一次 `ask` 调用的最终错误
///
/// 调度器内部重试瞬时错误，只把最后一次尝试的错误交给调用方。
#[derive(Debug, Error)]
pub enum AskError {
    #[error("问题校验失败: {0}")]
    Validation(#[from] ValidationError),
    /// 已有一个问题在处理中
    #[error("已有问题正在处理中")]
    Busy,
    /// 调用方放弃了本次提问
    #[error("请求已取消")]
    Cancelled,
    #[error("请求超时 (第 {attempt} 次尝试)")]
    Timeout { attempt: u32 },
    #[error("网络请求失败 (第 {attempt} 次尝试): {detail}")]
    NetworkFailure { attempt: u32, detail: String },
    #[error("服务端错误 (第 {attempt} 次尝试, 状态码 {status}): {body}")]
    ServerError { attempt: u32, status: u16, body: String },
    /// 服务端响应成功但违反了响应约定，不重试
    #[error("响应格式无效: {detail}")]
    InvalidResponse { detail: String },
}

/// 面向用户的错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Timeout,
    Connectivity,
    Generic,
}

/// 需要展示给用户、并在一段时间后自动消失的错误提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorNotice {
    pub category: ErrorCategory,
    pub message: String,
    pub display_for: Duration,
}

impl AskError {
    /// 是否属于可重试的瞬时错误
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AskError::Timeout { .. } | AskError::NetworkFailure { .. } | AskError::ServerError { .. }
        )
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AskError::Validation(_) | AskError::Busy => ErrorCategory::Validation,
            AskError::Timeout { .. } => ErrorCategory::Timeout,
            AskError::NetworkFailure { .. } => ErrorCategory::Connectivity,
            AskError::Cancelled | AskError::ServerError { .. } | AskError::InvalidResponse { .. } => {
                ErrorCategory::Generic
            }
        }
    }

    /// 构造用户可见的错误提示
    pub fn notice(&self, display_for: Duration) -> ErrorNotice {
        let message = match self {
            AskError::Validation(ValidationError::Empty) => "Please enter a question.".to_string(),
            AskError::Validation(ValidationError::TooLong { max, .. }) => {
                format!("Your question is too long. Please limit to {} characters.", max)
            }
            AskError::Busy => "Please wait for the current answer before asking again.".to_string(),
            AskError::Cancelled => "Request cancelled.".to_string(),
            AskError::Timeout { .. } => "Request timed out. Please try again.".to_string(),
            AskError::NetworkFailure { .. } => {
                "Network error. Please check your connection and try again.".to_string()
            }
            AskError::ServerError { .. } | AskError::InvalidResponse { .. } => {
                "Sorry, there was an error processing your request. Please try again.".to_string()
            }
        };

        ErrorNotice {
            category: self.category(),
            message,
            display_for,
        }
    }
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败 ({path}): {source}")]
    FileRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("配置项 {field} 无效: {reason}")]
    InvalidValue { field: String, reason: String },
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
