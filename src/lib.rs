//! # Doc Chat Client
//!
//! 文档问答客户端：把自由文本问题变成可靠的网络请求，
//! 再把非结构化的文档回答变成可渲染的结构化片段。
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 唯一接触网络的地方
//! - `HttpAskClient` - `POST /ask`，实现 `AskTransport`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 同步纯函数，不做 IO
//! - `sanitizer` → `formatter`（行内路径）
//! - `extractor` → `renderer`（结构化路径）
//! - `presenter` - 按配置选择路径
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 一个问题的完整发送流程
//! - `AskSession` - 单飞标志 + 取消令牌
//! - `Dispatcher` - 校验、单次截止时间、线性退避重试、结果分类
//!
//! ### ④ 展示层
//! - `app` - 终端适配器
//!
//! ## 模块结构

pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use clients::{AskTransport, HttpAskClient, TransportError};
pub use config::{Config, RenderMode};
pub use error::{AppError, AppResult, AskError, ErrorCategory, ErrorNotice, ValidationError};
pub use models::{AnswerPayload, Question, SourceAttribution, StructuredDocument};
pub use services::{extract, format, present, render, Fragment, Presentation};
pub use workflow::{AskSession, AttemptOutcome, DispatchReport, Dispatcher, RequestAttempt, RetryPolicy};
