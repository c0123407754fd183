//! Liveness endpoint

use axum::{http::StatusCode, response::IntoResponse};

/// GET /ping
///
/// Always 200 with an empty body.
pub async fn ping() -> impl IntoResponse {
    StatusCode::OK
}
