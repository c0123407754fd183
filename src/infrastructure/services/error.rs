use thiserror::Error;

use crate::domain::DomainError;

/// Failure of a core gateway; the HTTP layer collapses every variant to the error envelope
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Document staging failed: {0}")]
    Staging(#[source] DomainError),

    #[error("Provider call failed: {0}")]
    Provider(#[source] DomainError),

    #[error("No document was uploaded")]
    MissingDocument,
}

impl From<DomainError> for GatewayError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Staging { .. } => Self::Staging(error),
            other => Self::Provider(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_domain_error() {
        let staging: GatewayError = DomainError::staging("disk full").into();
        assert!(matches!(staging, GatewayError::Staging(_)));

        let provider: GatewayError = DomainError::provider("yandex", "HTTP 500").into();
        assert!(matches!(provider, GatewayError::Provider(_)));
        assert_eq!(
            provider.to_string(),
            "Provider call failed: Provider error: yandex - HTTP 500"
        );
    }
}
