use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;

use crate::domain::DomainError;

/// Trait for HTTP client operations (for mocking)
#[async_trait]
pub trait HttpClientTrait: Send + Sync + std::fmt::Debug {
    /// POST a JSON body and decode a JSON response
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError>;

    /// POST a JSON body and return the value of a response header
    async fn post_json_for_header(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
        header: &str,
    ) -> Result<String, DomainError>;

    /// POST raw bytes and decode a JSON response
    async fn post_bytes(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: Bytes,
    ) -> Result<serde_json::Value, DomainError>;
}

/// Real HTTP client using reqwest
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                DomainError::configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        headers: Vec<(&str, &str)>,
    ) -> Result<reqwest::Response, DomainError> {
        let mut request = request;

        for (key, value) in headers {
            request = request.header(key, value);
        }

        // Strip the URL: query strings may carry credentials
        let response = request.send().await.map_err(|e| {
            DomainError::provider("http", format!("Request failed: {}", e.without_url()))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_default();
            return Err(DomainError::provider(
                "http",
                format!("HTTP {}: {}", status, error_body),
            ));
        }

        Ok(response)
    }

    async fn decode_json(response: reqwest::Response) -> Result<serde_json::Value, DomainError> {
        response
            .json()
            .await
            .map_err(|e| DomainError::provider("http", format!("Failed to parse response: {}", e)))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClientTrait for HttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
    ) -> Result<serde_json::Value, DomainError> {
        let response = self.send(self.client.post(url).json(body), headers).await?;
        Self::decode_json(response).await
    }

    async fn post_json_for_header(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: &serde_json::Value,
        header: &str,
    ) -> Result<String, DomainError> {
        let response = self.send(self.client.post(url).json(body), headers).await?;

        response
            .headers()
            .get(header)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| {
                DomainError::provider("http", format!("Response is missing header '{}'", header))
            })
    }

    async fn post_bytes(
        &self,
        url: &str,
        headers: Vec<(&str, &str)>,
        body: Bytes,
    ) -> Result<serde_json::Value, DomainError> {
        let response = self.send(self.client.post(url).body(body), headers).await?;
        Self::decode_json(response).await
    }
}
