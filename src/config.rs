use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::workflow::RetryPolicy;

/// 回答的展示方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// 只经过 Formatter 的行内标记
    Inline,
    /// Extractor + Renderer 的结构化文档
    Structured,
}

impl RenderMode {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "inline" => Some(RenderMode::Inline),
            "structured" => Some(RenderMode::Structured),
            _ => None,
        }
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 问答服务地址（不含 /ask）
    pub api_base_url: String,
    /// 单次尝试的超时时间（毫秒）
    pub request_timeout_ms: u64,
    /// 最大尝试次数（含第一次）
    pub max_attempts: u32,
    /// 重试退避基数（毫秒），第 k 次失败后等待 k × 基数
    pub retry_base_delay_ms: u64,
    /// 问题最大字符数
    pub max_question_chars: usize,
    /// 错误提示显示时长（秒）
    pub error_display_secs: u64,
    /// 回答展示方式
    pub render_mode: RenderMode,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_ms: 30_000,
            max_attempts: 3,
            retry_base_delay_ms: 1_000,
            max_question_chars: 500,
            error_display_secs: 5,
            render_mode: RenderMode::Inline,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件，缺省字段使用默认值，然后叠加环境变量
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        Ok(config.with_env_overrides())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: String::new(),
            source: e,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn with_env_overrides(self) -> Self {
        let env = |name: &str| std::env::var(name).ok();
        Self {
            api_base_url: env("DOC_CHAT_API_BASE_URL").unwrap_or(self.api_base_url),
            request_timeout_ms: env("DOC_CHAT_REQUEST_TIMEOUT_MS").and_then(|v| v.parse().ok()).unwrap_or(self.request_timeout_ms),
            max_attempts: env("DOC_CHAT_MAX_ATTEMPTS").and_then(|v| v.parse().ok()).filter(|n| *n > 0).unwrap_or(self.max_attempts),
            retry_base_delay_ms: env("DOC_CHAT_RETRY_BASE_DELAY_MS").and_then(|v| v.parse().ok()).unwrap_or(self.retry_base_delay_ms),
            max_question_chars: env("DOC_CHAT_MAX_QUESTION_CHARS").and_then(|v| v.parse().ok()).unwrap_or(self.max_question_chars),
            error_display_secs: env("DOC_CHAT_ERROR_DISPLAY_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.error_display_secs),
            render_mode: env("DOC_CHAT_RENDER_MODE").and_then(|v| RenderMode::parse(&v)).unwrap_or(self.render_mode),
            verbose_logging: env("DOC_CHAT_VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts".to_string(),
                reason: "至少需要 1 次尝试".to_string(),
            });
        }
        if self.max_question_chars == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_question_chars".to_string(),
                reason: "必须大于 0".to_string(),
            });
        }
        Ok(())
    }

    /// 由配置推导调度器的重试策略
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.retry_base_delay_ms),
            attempt_timeout: Duration::from_millis(self.request_timeout_ms),
            max_question_chars: self.max_question_chars,
        }
    }

    pub fn error_display(&self) -> Duration {
        Duration::from_secs(self.error_display_secs)
    }
}
