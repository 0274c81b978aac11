//! 单次尝试记录

use tokio::time::Instant;

use crate::error::AskError;
use crate::models::AnswerPayload;

/// 单次尝试的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Pending,
    Success,
    NetworkFailure,
    Timeout,
    ServerError,
    InvalidResponse,
    Cancelled,
}

impl AttemptOutcome {
    pub fn of(result: &Result<AnswerPayload, AskError>) -> Self {
        match result {
            Ok(_) => AttemptOutcome::Success,
            Err(AskError::Timeout { .. }) => AttemptOutcome::Timeout,
            Err(AskError::NetworkFailure { .. }) => AttemptOutcome::NetworkFailure,
            Err(AskError::ServerError { .. }) => AttemptOutcome::ServerError,
            Err(AskError::InvalidResponse { .. }) => AttemptOutcome::InvalidResponse,
            Err(AskError::Cancelled | AskError::Busy | AskError::Validation(_)) => AttemptOutcome::Cancelled,
        }
    }
}

/// 一次网络往返
///
/// 只在一次 `ask` 调用内存在，由调度器独占。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestAttempt {
    /// 从 1 开始
    pub number: u32,
    pub started_at: Instant,
    pub finished_at: Option<Instant>,
    pub outcome: AttemptOutcome,
}

impl RequestAttempt {
    pub fn start(number: u32) -> Self {
        Self {
            number,
            started_at: Instant::now(),
            finished_at: None,
            outcome: AttemptOutcome::Pending,
        }
    }

    pub fn finish(&mut self, outcome: AttemptOutcome) {
        self.finished_at = Some(Instant::now());
        self.outcome = outcome;
    }
}
