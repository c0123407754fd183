//! Account endpoints
//!
//! Registration and sign-in with email and password. A successful sign-in
//! sets the session cookie.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::infrastructure::user::SignUpRequest;

/// Create the account router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/sign-up", post(sign_up))
        .route("/sign-in", post(sign_in))
}

/// Registration body
#[derive(Debug, Deserialize)]
pub struct SignUpBody {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Sign-in body; fields are optional so a missing one maps to 400 rather than a parse error
#[derive(Debug, Deserialize)]
pub struct SignInBody {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpBody>,
) -> Result<StatusCode, ApiError> {
    debug!("Sign-up requested");

    state
        .user_service
        .register(SignUpRequest {
            name: body.name,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(StatusCode::OK)
}

/// POST /sign-in
pub async fn sign_in(
    State(state): State<AppState>,
    Json(body): Json<SignInBody>,
) -> Result<Response, ApiError> {
    let (Some(email), Some(password)) = (
        body.email.filter(|e| !e.trim().is_empty()),
        body.password.filter(|p| !p.is_empty()),
    ) else {
        return Err(ApiError::bad_request());
    };

    let user = state
        .user_service
        .authenticate(&email, &password)
        .await?
        .ok_or_else(ApiError::unauthorized)?;

    let token = state.session_issuer.issue(&user)?;
    info!(user_id = %user.id(), "User signed in");

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.session_issuer.cookie(&token))],
    )
        .into_response())
}
