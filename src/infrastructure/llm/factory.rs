use std::sync::Arc;
use std::time::Duration;

use super::gemini::GeminiProvider;
use super::http_client::HttpClient;
use super::yandex::{YandexGptConfig, YandexGptProvider};
use crate::config::ProvidersConfig;
use crate::domain::{CompletionProvider, DomainError, MultimodalProvider};

/// Builds the provider clients once at startup
#[derive(Debug)]
pub struct ProviderFactory;

impl ProviderFactory {
    /// YandexGPT completion provider from configuration
    pub fn create_completion(
        config: &ProvidersConfig,
    ) -> Result<Arc<dyn CompletionProvider>, DomainError> {
        let yandex = &config.yandex;

        if yandex.api_key.is_empty() || yandex.folder_id.is_empty() {
            tracing::warn!("YandexGPT credentials are not configured; /sources calls will fail");
        }

        let provider_config = YandexGptConfig::new(&yandex.api_key, &yandex.folder_id)
            .with_model(&yandex.model)
            .with_completion_url(&yandex.completion_url);

        let client = Self::http_client(config)?;
        Ok(Arc::new(YandexGptProvider::new(client, provider_config)))
    }

    /// Gemini multimodal provider from configuration
    pub fn create_multimodal(
        config: &ProvidersConfig,
    ) -> Result<Arc<dyn MultimodalProvider>, DomainError> {
        let gemini = &config.gemini;

        if gemini.api_key.is_empty() {
            tracing::warn!("Gemini API key is not configured; /questions calls will fail");
        }

        let client = Self::http_client(config)?;
        Ok(Arc::new(GeminiProvider::with_base_url(
            client,
            &gemini.api_key,
            &gemini.base_url,
        )))
    }

    fn http_client(config: &ProvidersConfig) -> Result<HttpClient, DomainError> {
        HttpClient::with_timeout(Duration::from_secs(config.request_timeout_secs))
    }
}
