//! 请求调度 - 流程层
//!
//! 定义“一个问题”的完整发送流程：
//! 1. 单飞检查 → 问题校验（失败则不发请求）
//! 2. 每次尝试有独立的截止时间，超时即放弃
//! 3. 超时 / 网络错误 / 服务端错误按线性退避重试，响应格式无效不重试
//! 4. 外部取消会中止当前尝试并阻止后续重试

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::clients::{AskTransport, TransportError};
use crate::error::AskError;
use crate::models::question::MAX_QUESTION_CHARS;
use crate::models::{AnswerPayload, Question};
use crate::utils::truncate_text;
use crate::workflow::attempt::{AttemptOutcome, RequestAttempt};
use crate::workflow::session::AskSession;

/// 重试策略
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// 最大尝试次数（含第一次）
    pub max_attempts: u32,
    /// 第 k 次失败后等待 k × base_delay
    pub base_delay: Duration,
    /// 单次尝试的截止时间
    pub attempt_timeout: Duration,
    pub max_question_chars: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            attempt_timeout: Duration::from_secs(30),
            max_question_chars: MAX_QUESTION_CHARS,
        }
    }
}

impl RetryPolicy {
    /// 第 `failed_attempt` 次尝试失败后的等待时间
    pub fn backoff_after(&self, failed_attempt: u32) -> Duration {
        self.base_delay * failed_attempt
    }
}

/// 一次 `ask` 调用的完整记录
#[derive(Debug)]
pub struct DispatchReport {
    pub result: Result<AnswerPayload, AskError>,
    pub attempts: Vec<RequestAttempt>,
}

/// 请求调度器
///
/// 除网络调用外没有其他副作用。
pub struct Dispatcher<T> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: AskTransport> Dispatcher<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// 在会话内提问
    ///
    /// 处理中标志在校验之前设置，所有退出路径上都会清除。
    pub async fn ask(&self, session: &AskSession, text: &str) -> Result<AnswerPayload, AskError> {
        let guard = session.begin()?;

        let question = Question::with_limit(text, self.policy.max_question_chars).map_err(|e| {
            warn!("问题校验失败: {}", e);
            AskError::Validation(e)
        })?;

        self.send(&question, guard.token()).await
    }

    /// 发送已校验的问题，只返回最终结果
    pub async fn send(
        &self,
        question: &Question,
        cancel: &CancellationToken,
    ) -> Result<AnswerPayload, AskError> {
        self.send_traced(question, cancel).await.result
    }

    /// 发送已校验的问题，并返回每次尝试的记录
    pub async fn send_traced(&self, question: &Question, cancel: &CancellationToken) -> DispatchReport {
        info!("❓ 提问: {}", truncate_text(question.as_str(), 80));

        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = Vec::with_capacity(max_attempts as usize);
        let mut number = 1;

        loop {
            let mut attempt = RequestAttempt::start(number);
            let result = self.run_attempt(question, number, cancel).await;
            attempt.finish(AttemptOutcome::of(&result));
            attempts.push(attempt);

            let err = match result {
                Ok(payload) => {
                    info!("✓ 第 {}/{} 次尝试成功", number, max_attempts);
                    return DispatchReport {
                        result: Ok(payload),
                        attempts,
                    };
                }
                Err(err) => err,
            };

            if !err.is_retryable() || number >= max_attempts {
                error!("❌ 提问失败 (共 {} 次尝试): {}", number, err);
                return DispatchReport {
                    result: Err(err),
                    attempts,
                };
            }

            let delay = self.policy.backoff_after(number);
            warn!(
                "⚠️ 第 {}/{} 次尝试失败: {}，{:?} 后重试...",
                number, max_attempts, err, delay
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("请求在退避期间被取消");
                    return DispatchReport {
                        result: Err(AskError::Cancelled),
                        attempts,
                    };
                }
                _ = tokio::time::sleep(delay) => {}
            }

            number += 1;
        }
    }

    /// 单次尝试：独立的截止时间，外部取消立即中止
    async fn run_attempt(
        &self,
        question: &Question,
        number: u32,
        cancel: &CancellationToken,
    ) -> Result<AnswerPayload, AskError> {
        if cancel.is_cancelled() {
            return Err(AskError::Cancelled);
        }

        debug!("发起第 {} 次尝试，截止时间 {:?}", number, self.policy.attempt_timeout);

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(AskError::Cancelled),
            outcome = tokio::time::timeout(self.policy.attempt_timeout, self.transport.ask(question)) => outcome,
        };

        match outcome {
            Err(_elapsed) => Err(AskError::Timeout { attempt: number }),
            Ok(Ok(payload)) => Ok(payload),
            Ok(Err(e)) => Err(classify(e, number)),
        }
    }
}

fn classify(error: TransportError, attempt: u32) -> AskError {
    match error {
        TransportError::Network(detail) => AskError::NetworkFailure { attempt, detail },
        TransportError::Status { status, body } => AskError::ServerError { attempt, status, body },
        TransportError::InvalidBody(detail) => AskError::InvalidResponse { detail },
    }
}
