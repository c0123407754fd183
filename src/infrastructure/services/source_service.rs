//! Source recommendation gateway

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::{observe_provider_call, GatewayError};
use crate::domain::sources::{
    build_source_prompt, RecommendationRequest, SOURCE_MAX_TOKENS, SOURCE_TEMPERATURE,
};
use crate::domain::{CompletionProvider, CompletionRequest, ProviderAnswer};

/// Asks the completion provider for literature sources on a topic
#[derive(Debug, Clone)]
pub struct SourceService {
    provider: Arc<dyn CompletionProvider>,
}

impl SourceService {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    #[instrument(skip_all, fields(provider = self.provider.provider_name()))]
    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> Result<ProviderAnswer, GatewayError> {
        let completion = CompletionRequest::builder()
            .messages(build_source_prompt(&request))
            .temperature(SOURCE_TEMPERATURE)
            .max_tokens(SOURCE_MAX_TOKENS)
            .build();

        debug!(
            has_date_from = request.date_from.is_some(),
            has_date_to = request.date_to.is_some(),
            "Requesting source recommendations"
        );

        let provider = self.provider.provider_name();
        observe_provider_call(provider, "complete", self.provider.complete(completion))
            .await
            .map_err(|e| {
                warn!(error = %e, "Source recommendation failed");
                GatewayError::from(e)
            })
    }
}
