//! 流程层
//!
//! - `attempt` - 单次尝试记录
//! - `session` - 单飞标志 + 取消令牌
//! - `dispatcher` - 校验、截止时间、退避重试、结果分类

pub mod attempt;
pub mod dispatcher;
pub mod session;

pub use attempt::{AttemptOutcome, RequestAttempt};
pub use dispatcher::{DispatchReport, Dispatcher, RetryPolicy};
pub use session::{AskSession, InFlightGuard};
