//! 问答 API 客户端
//!
//! 封装 `POST /ask` 的请求构造与响应解析

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde_json::{json, Value};
use tracing::debug;

use crate::clients::{AskTransport, TransportError};
use crate::config::Config;
use crate::models::{AnswerPayload, Question};
use crate::utils::truncate_text;

/// HTTP 问答客户端
#[derive(Clone, Debug)]
pub struct HttpAskClient {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpAskClient {
    /// 创建新的问答客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_base_url)
    }

    pub fn with_base_url(base_url: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}/ask", base_url.as_ref().trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AskTransport for HttpAskClient {
    async fn ask(&self, question: &Question) -> Result<AnswerPayload, TransportError> {
        debug!("POST {} 问题长度: {} 字符", self.endpoint, question.char_count());

        let response = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&json!({ "question": question }))
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        debug!("响应状态: {} 响应体: {}", status, truncate_text(&body, 200));

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_answer(&body)
    }
}

/// 解析成功响应，必须是包含字符串 `answer` 字段的 JSON 对象
pub fn parse_answer(body: &str) -> Result<AnswerPayload, TransportError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| TransportError::InvalidBody(format!("JSON解析失败: {}", e)))?;

    match value.get("answer") {
        Some(Value::String(_)) => serde_json::from_value(value)
            .map_err(|e| TransportError::InvalidBody(format!("字段类型不符: {}", e))),
        Some(_) => Err(TransportError::InvalidBody("answer 字段不是字符串".to_string())),
        None => Err(TransportError::InvalidBody("缺少 answer 字段".to_string())),
    }
}
