//! 问答服务客户端
//!
//! `AskTransport` 是调度器与网络之间唯一的接缝：一次调用就是一次尝试，
//! 超时、重试和取消都由调度器负责。

use std::future::Future;

use thiserror::Error;

use crate::models::{AnswerPayload, Question};

pub mod ask_client;

pub use ask_client::HttpAskClient;

/// 单次传输失败
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// 传输层失败（连接、DNS、读取响应体）
    #[error("网络错误: {0}")]
    Network(String),
    /// 非成功状态码
    #[error("状态码 {status}: {body}")]
    Status { status: u16, body: String },
    /// 成功状态码但响应体不符合约定
    #[error("响应体无效: {0}")]
    InvalidBody(String),
}

/// 发送一次问题
pub trait AskTransport {
    fn ask(&self, question: &Question) -> impl Future<Output = Result<AnswerPayload, TransportError>> + Send;
}
