//! Infrastructure layer - External service implementations

pub mod auth;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod services;
pub mod staging;
pub mod user;
