//! Provider-backed endpoints answering with the `{"answer": ...}` envelope

mod questions;
mod sources;

use axum::{extract::DefaultBodyLimit, routing::post, Router};

use crate::api::state::AppState;

pub use questions::generate_questions;
pub use sources::recommend_sources;

/// Create the gateway router; `max_upload_bytes` bounds the multipart body of /questions
pub fn create_gateway_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/sources", post(recommend_sources))
        .route(
            "/questions",
            post(generate_questions).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
}
