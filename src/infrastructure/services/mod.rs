//! Gateway services
//!
//! Each service owns one core endpoint's protocol: build the provider input,
//! make the outbound call(s) and collapse any failure into `GatewayError`.

mod error;
mod question_service;
mod source_service;

use std::future::Future;
use std::time::Instant;

use crate::domain::DomainError;
use crate::infrastructure::observability::record_provider_call;

pub use error::GatewayError;
pub use question_service::QuestionService;
pub use source_service::SourceService;

/// Await a provider operation and record its outcome and latency
async fn observe_provider_call<T>(
    provider: &str,
    operation: &str,
    call: impl Future<Output = Result<T, DomainError>>,
) -> Result<T, DomainError> {
    let start = Instant::now();
    let result = call.await;

    record_provider_call(provider, operation, result.is_ok(), start.elapsed());

    result
}
