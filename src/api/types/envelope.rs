//! Response envelope of the core gateways

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::ProviderAnswer;
use crate::infrastructure::services::GatewayError;

/// Answer text returned for every failed gateway call
pub const ERROR_ANSWER: &str = "error";

/// `{"answer": ...}` body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerBody {
    pub answer: String,
}

/// Gateway response: 200 with the provider text, or 400 with `"error"`
#[derive(Debug, Clone)]
pub struct AnswerEnvelope {
    status: StatusCode,
    body: AnswerBody,
}

impl AnswerEnvelope {
    pub fn ok(answer: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK,
            body: AnswerBody {
                answer: answer.into(),
            },
        }
    }

    pub fn error() -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: AnswerBody {
                answer: ERROR_ANSWER.to_string(),
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn answer(&self) -> &str {
        &self.body.answer
    }
}

impl From<Result<ProviderAnswer, GatewayError>> for AnswerEnvelope {
    fn from(result: Result<ProviderAnswer, GatewayError>) -> Self {
        match result {
            Ok(answer) => Self::ok(answer.text),
            Err(_) => Self::error(),
        }
    }
}

impl IntoResponse for AnswerEnvelope {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
