//! HTTP request/response types

pub mod envelope;
pub mod error;
pub mod json;

pub use envelope::{AnswerBody, AnswerEnvelope, ERROR_ANSWER};
pub use error::{ApiError, ApiErrorResponse};
pub use json::{Json, JsonRejection};
