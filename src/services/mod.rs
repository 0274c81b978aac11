//! 业务能力层
//!
//! 全部是同步纯函数，不做 IO，可以在任意线程调用。

pub mod extractor;
pub mod formatter;
pub mod presenter;
pub mod renderer;
pub mod sanitizer;

pub use extractor::extract;
pub use formatter::format;
pub use presenter::{present, Presentation};
pub use renderer::{render, Fragment, Section};
