pub mod answer;
pub mod document;
pub mod question;

pub use answer::{AnswerPayload, SourceAttribution};
pub use document::StructuredDocument;
pub use question::Question;
