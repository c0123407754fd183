//! Error responses of the account endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const INVALID_REQUEST_MESSAGE: &str = "Ошибка в данных запроса.";
pub const DUPLICATE_EMAIL_MESSAGE: &str = "Такой email уже зарегистрирован.";
pub const BAD_CREDENTIALS_MESSAGE: &str = "Неверный email или пароль.";
pub const INTERNAL_ERROR_MESSAGE: &str = "Внутренняя ошибка сервера.";
pub const NOT_FOUND_MESSAGE: &str = "Ресурс не найден.";

/// `{"status": "error", "message": ...}` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub status: String,
    pub message: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                status: "error".to_string(),
                message: message.into(),
            },
        }
    }

    /// Malformed or invalid request data
    pub fn bad_request() -> Self {
        Self::new(StatusCode::BAD_REQUEST, INVALID_REQUEST_MESSAGE)
    }

    /// Email already registered
    pub fn conflict() -> Self {
        Self::new(StatusCode::CONFLICT, DUPLICATE_EMAIL_MESSAGE)
    }

    /// Wrong email or password
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, BAD_CREDENTIALS_MESSAGE)
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
    }

    /// Generic failure; the cause is only logged
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Validation { .. } => Self::bad_request(),
            DomainError::Conflict { .. } => Self::conflict(),
            DomainError::NotFound { .. } => Self::not_found(),
            DomainError::Provider { .. }
            | DomainError::Configuration { .. }
            | DomainError::Internal { .. }
            | DomainError::Storage { .. }
            | DomainError::Staging { .. } => {
                tracing::error!(error = %err, "Request failed with internal error");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.response.message)
    }
}

impl std::error::Error for ApiError {}
