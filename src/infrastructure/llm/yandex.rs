use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{
    CompletionProvider, CompletionRequest, DomainError, Message, ProviderAnswer, Usage,
};

pub const DEFAULT_YANDEX_COMPLETION_URL: &str =
    "https://llm.api.cloud.yandex.net/foundationModels/v1/completion";
pub const DEFAULT_YANDEX_MODEL: &str = "yandexgpt-lite";

const PROVIDER_NAME: &str = "yandex";

/// Connection settings for YandexGPT
#[derive(Debug, Clone)]
pub struct YandexGptConfig {
    pub api_key: String,
    pub folder_id: String,
    pub model: String,
    pub completion_url: String,
}

impl YandexGptConfig {
    pub fn new(api_key: impl Into<String>, folder_id: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            folder_id: folder_id.into(),
            model: DEFAULT_YANDEX_MODEL.to_string(),
            completion_url: DEFAULT_YANDEX_COMPLETION_URL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_completion_url(mut self, url: impl Into<String>) -> Self {
        self.completion_url = url.into();
        self
    }

    /// `gpt://{folder}/{model}/latest`
    pub fn model_uri(&self) -> String {
        format!("gpt://{}/{}/latest", self.folder_id, self.model)
    }
}

/// YandexGPT foundation-models completion provider
#[derive(Debug)]
pub struct YandexGptProvider<C: HttpClientTrait> {
    client: C,
    config: YandexGptConfig,
    auth_header: String,
}

impl<C: HttpClientTrait> YandexGptProvider<C> {
    pub fn new(client: C, config: YandexGptConfig) -> Self {
        let auth_header = format!("Api-Key {}", config.api_key);

        Self {
            client,
            config,
            auth_header,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> serde_json::Value {
        let messages: Vec<YandexMessage> = request
            .messages
            .iter()
            .map(YandexMessage::from_domain)
            .collect();

        let mut options = serde_json::json!({ "stream": request.stream });

        if let Some(temperature) = request.temperature {
            options["temperature"] = serde_json::json!(temperature);
        }

        // The API takes maxTokens as a string-encoded int64
        if let Some(max_tokens) = request.max_tokens {
            options["maxTokens"] = serde_json::json!(max_tokens.to_string());
        }

        serde_json::json!({
            "modelUri": self.config.model_uri(),
            "completionOptions": options,
            "messages": messages,
        })
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("x-folder-id", self.config.folder_id.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<ProviderAnswer, DomainError> {
        let response: YandexResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        let alternative = response
            .result
            .alternatives
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "No alternatives in response"))?;

        let model = response
            .result
            .model_version
            .map(|version| format!("{}@{}", self.config.model, version))
            .unwrap_or_else(|| self.config.model.clone());

        let mut answer = ProviderAnswer::new(alternative.message.text, model);

        if let Some(usage) = response.result.usage {
            answer = answer.with_usage(Usage::new(
                parse_token_count(usage.input_text_tokens.as_deref()),
                parse_token_count(usage.completion_tokens.as_deref()),
            ));
        }

        Ok(answer)
    }
}

#[async_trait]
impl<C: HttpClientTrait + 'static> CompletionProvider for YandexGptProvider<C> {
    async fn complete(&self, request: CompletionRequest) -> Result<ProviderAnswer, DomainError> {
        let body = self.build_request(&request);

        tracing::debug!(
            model_uri = %self.config.model_uri(),
            messages = request.messages.len(),
            "Sending YandexGPT completion request"
        );

        let response = self
            .client
            .post_json(&self.config.completion_url, self.headers(), &body)
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

fn parse_token_count(value: Option<&str>) -> u32 {
    value.and_then(|v| v.parse().ok()).unwrap_or(0)
}

// YandexGPT API types

#[derive(Debug, Serialize)]
struct YandexMessage {
    role: &'static str,
    text: String,
}

impl YandexMessage {
    fn from_domain(message: &Message) -> Self {
        Self {
            role: message.role.as_str(),
            text: message.text.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct YandexResponse {
    result: YandexResult,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YandexResult {
    alternatives: Vec<YandexAlternative>,
    usage: Option<YandexUsage>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YandexAlternative {
    message: YandexResponseMessage,
}

#[derive(Debug, Deserialize)]
struct YandexResponseMessage {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct YandexUsage {
    input_text_tokens: Option<String>,
    completion_tokens: Option<String>,
}
