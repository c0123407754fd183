use async_trait::async_trait;
use std::fmt::Debug;
use std::path::Path;

use super::{CompletionRequest, ContentPart, ProviderAnswer, UploadedFile};
use crate::domain::DomainError;

/// Trait for text-completion providers (YandexGPT)
#[async_trait]
pub trait CompletionProvider: Send + Sync + Debug {
    /// Send a non-streaming completion request
    async fn complete(&self, request: CompletionRequest) -> Result<ProviderAnswer, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}

/// Trait for multimodal providers that accept uploaded files (Gemini)
#[async_trait]
pub trait MultimodalProvider: Send + Sync + Debug {
    /// Upload a file from the local filesystem and return the provider handle
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedFile, DomainError>;

    /// Generate content from a list of inputs
    async fn generate_content(
        &self,
        model: &str,
        parts: Vec<ContentPart>,
    ) -> Result<ProviderAnswer, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;
}
