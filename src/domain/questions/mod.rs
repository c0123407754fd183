//! Defense question domain
//!
//! Uploaded document, question-count hint and the instruction prompt for the
//! `/questions` gateway.

mod prompt;
mod request;

pub use prompt::build_question_prompt;
pub use request::{parse_max_questions, Document, QuestionRequest, DEFAULT_MAX_QUESTIONS};
