//! HTTP API layer

pub mod auth;
pub mod gateway;
pub mod health;
pub mod middleware;
pub mod router;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_support;

pub use router::{create_app, create_router_with_state};
pub use state::AppState;
