//! 提问会话
//!
//! 持有单飞标志和当前提问的取消令牌，替代全局的“处理中”状态。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::AskError;

/// 同一时间最多只有一个问题在处理
#[derive(Debug, Default)]
pub struct AskSession {
    in_flight: AtomicBool,
    current: Mutex<Option<CancellationToken>>,
}

impl AskSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// 开始一次提问；已有提问在处理中时直接拒绝，不排队
    pub fn begin(&self) -> Result<InFlightGuard<'_>, AskError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("拒绝重叠提交：已有问题在处理中");
            return Err(AskError::Busy);
        }

        let token = CancellationToken::new();
        *self.lock_current() = Some(token.clone());

        Ok(InFlightGuard {
            session: self,
            token,
        })
    }

    /// 取消当前提问；没有提问在处理时返回 false
    pub fn cancel(&self) -> bool {
        match self.lock_current().as_ref() {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    fn lock_current(&self) -> MutexGuard<'_, Option<CancellationToken>> {
        self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// 单飞守卫，离开作用域时清除处理中标志
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    session: &'a AskSession,
    token: CancellationToken,
}

impl InFlightGuard<'_> {
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self.session.lock_current() = None;
        self.session.in_flight.store(false, Ordering::Release);
    }
}
