use axum::{middleware, routing::get, Router};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use super::auth;
use super::gateway;
use super::health;
use super::middleware::{logging_middleware, metrics_middleware, security_headers_middleware};
use super::state::AppState;
use crate::config::ServerConfig;
use crate::infrastructure::observability::{create_metrics_router, PrometheusMetrics};

/// API routes without the base prefix
pub fn create_api_router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/ping", get(health::ping))
        .merge(gateway::create_gateway_router(max_upload_bytes))
        .merge(auth::create_auth_router())
}

/// Create the full router with application state and middleware
pub fn create_router_with_state(state: AppState, server: &ServerConfig) -> Router {
    let api = create_api_router(server.max_upload_bytes);

    let router = match normalize_base_path(&server.base_path) {
        Some(base) => Router::new().nest(&base, api),
        None => api,
    };

    router
        .with_state(state)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Full router plus the Prometheus endpoint when metrics are enabled
pub fn create_app(
    state: AppState,
    server: &ServerConfig,
    metrics: Option<(PrometheusMetrics, &str)>,
) -> Router {
    let router = create_router_with_state(state, server);

    match metrics {
        Some((metrics, path)) => router.merge(create_metrics_router(metrics, path)),
        None => router,
    }
}

/// `/api/` -> `/api`; empty or `/` means routes live at the root
fn normalize_base_path(base_path: &str) -> Option<String> {
    let trimmed = base_path.trim().trim_matches('/');

    if trimmed.is_empty() {
        None
    } else {
        Some(format!("/{}", trimmed))
    }
}
