use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::http_client::HttpClientTrait;
use crate::domain::{
    ContentPart, DomainError, MultimodalProvider, ProviderAnswer, UploadedFile, Usage,
};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const PROVIDER_NAME: &str = "gemini";
const UPLOAD_URL_HEADER: &str = "x-goog-upload-url";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini generative-language API provider with resumable file upload
#[derive(Debug)]
pub struct GeminiProvider<C: HttpClientTrait> {
    client: C,
    api_key: String,
    base_url: String,
}

impl<C: HttpClientTrait> GeminiProvider<C> {
    pub fn new(client: C, api_key: impl Into<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_GEMINI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    // The key travels in a header; URLs end up in transport error text
    fn upload_start_url(&self) -> String {
        format!("{}/upload/v1beta/files", self.base_url)
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    fn build_generate_request(&self, parts: &[ContentPart]) -> serde_json::Value {
        let parts: Vec<GeminiPart> = parts.iter().map(GeminiPart::from_domain).collect();

        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": parts,
            }]
        })
    }

    fn parse_upload_response(&self, json: serde_json::Value) -> Result<UploadedFile, DomainError> {
        let response: GeminiUploadResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to parse upload response: {}", e))
        })?;

        let file = response.file;
        Ok(UploadedFile::new(file.name, file.uri, file.mime_type))
    }

    fn parse_generate_response(
        &self,
        model: &str,
        json: serde_json::Value,
    ) -> Result<ProviderAnswer, DomainError> {
        let response: GeminiResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider(PROVIDER_NAME, format!("Failed to parse response: {}", e))
        })?;

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider(PROVIDER_NAME, "No candidates in response"))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(DomainError::provider(
                PROVIDER_NAME,
                format!(
                    "Candidate has no text (finish reason: {})",
                    candidate.finish_reason.as_deref().unwrap_or("unknown")
                ),
            ));
        }

        let model = response.model_version.unwrap_or_else(|| model.to_string());
        let mut answer = ProviderAnswer::new(text, model);

        if let Some(usage) = response.usage_metadata {
            answer = answer.with_usage(Usage::new(
                usage.prompt_token_count,
                usage.candidates_token_count,
            ));
        }

        Ok(answer)
    }
}

#[async_trait]
impl<C: HttpClientTrait + 'static> MultimodalProvider for GeminiProvider<C> {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<UploadedFile, DomainError> {
        let content = tokio::fs::read(path).await.map_err(|e| {
            DomainError::staging(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let content_length = content.len().to_string();

        tracing::debug!(
            mime_type = %mime_type,
            bytes = content.len(),
            "Starting Gemini resumable upload"
        );

        let metadata = serde_json::json!({ "file": { "display_name": display_name } });
        let upload_url = self
            .client
            .post_json_for_header(
                &self.upload_start_url(),
                vec![
                    (API_KEY_HEADER, self.api_key.as_str()),
                    ("X-Goog-Upload-Protocol", "resumable"),
                    ("X-Goog-Upload-Command", "start"),
                    ("X-Goog-Upload-Header-Content-Length", content_length.as_str()),
                    ("X-Goog-Upload-Header-Content-Type", mime_type),
                    ("Content-Type", "application/json"),
                ],
                &metadata,
                UPLOAD_URL_HEADER,
            )
            .await?;

        let response = self
            .client
            .post_bytes(
                &upload_url,
                vec![
                    (API_KEY_HEADER, self.api_key.as_str()),
                    ("X-Goog-Upload-Offset", "0"),
                    ("X-Goog-Upload-Command", "upload, finalize"),
                ],
                Bytes::from(content),
            )
            .await?;

        let file = self.parse_upload_response(response)?;
        tracing::debug!(file = %file.name, "Gemini upload finalized");

        Ok(file)
    }

    async fn generate_content(
        &self,
        model: &str,
        parts: Vec<ContentPart>,
    ) -> Result<ProviderAnswer, DomainError> {
        let body = self.build_generate_request(&parts);

        tracing::debug!(model = %model, parts = parts.len(), "Sending Gemini generateContent request");

        let response = self
            .client
            .post_json(
                &self.generate_url(model),
                vec![
                    (API_KEY_HEADER, self.api_key.as_str()),
                    ("Content-Type", "application/json"),
                ],
                &body,
            )
            .await?;

        self.parse_generate_response(model, response)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum GeminiPart {
    Text {
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    FileData {
        file_data: GeminiFileData,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiFileData {
    mime_type: String,
    file_uri: String,
}

impl GeminiPart {
    fn from_domain(part: &ContentPart) -> Self {
        match part {
            ContentPart::Text { text } => Self::Text { text: text.clone() },
            ContentPart::File { uri, mime_type } => Self::FileData {
                file_data: GeminiFileData {
                    mime_type: mime_type.clone(),
                    file_uri: uri.clone(),
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiUploadResponse {
    file: GeminiFile,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiFile {
    name: String,
    uri: String,
    mime_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;

    const BASE: &str = "https://gemini.test";
    const START_URL: &str = "https://gemini.test/upload/v1beta/files";
    const SESSION_URL: &str = "https://gemini.test/upload/session/abc";
    const GENERATE_URL: &str =
        "https://gemini.test/v1beta/models/gemini-1.5-flash:generateContent";

    fn upload_body() -> serde_json::Value {
        serde_json::json!({
            "file": {
                "name": "files/abc123",
                "uri": "https://gemini.test/v1beta/files/abc123",
                "mimeType": "application/pdf",
                "sizeBytes": "8"
            }
        })
    }

    fn generate_body() -> serde_json::Value {
        serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{"text": "1. Почему "}, {"text": "выбрана эта тема?"}]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 300,
                "candidatesTokenCount": 20,
                "totalTokenCount": 320
            },
            "modelVersion": "gemini-1.5-flash-002"
        })
    }

    #[tokio::test]
    async fn test_gemini_upload_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("slides.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let client = MockHttpClient::new()
            .with_header_response(START_URL, SESSION_URL)
            .with_response(SESSION_URL, upload_body());
        let provider = GeminiProvider::with_base_url(client, "test-key", BASE);

        let file = provider
            .upload_file(&path, "application/pdf", "slides.pdf")
            .await
            .unwrap();

        assert_eq!(file.name, "files/abc123");
        assert_eq!(file.uri, "https://gemini.test/v1beta/files/abc123");
        assert_eq!(file.mime_type, "application/pdf");

        let recorded = provider.client.requests();
        assert_eq!(recorded.len(), 2);
        assert_eq!(
            recorded[0].json.clone().unwrap()["file"]["display_name"],
            "slides.pdf"
        );
        assert!(recorded[0]
            .headers
            .contains(&("X-Goog-Upload-Command".to_string(), "start".to_string())));
        for request in &recorded {
            assert!(!request.url.contains("test-key"));
            assert!(request
                .headers
                .contains(&("x-goog-api-key".to_string(), "test-key".to_string())));
        }
        assert_eq!(recorded[1].bytes.as_deref(), Some(&b"%PDF-1.4"[..]));
        assert!(recorded[1].headers.contains(&(
            "X-Goog-Upload-Command".to_string(),
            "upload, finalize".to_string()
        )));
    }

    #[tokio::test]
    async fn test_gemini_upload_missing_file() {
        let provider = GeminiProvider::with_base_url(MockHttpClient::new(), "test-key", BASE);

        let result = provider
            .upload_file(Path::new("/nonexistent/slides.pdf"), "application/pdf", "x")
            .await;

        assert!(matches!(result, Err(DomainError::Staging { .. })));
        assert!(provider.client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_gemini_generate_content() {
        let client = MockHttpClient::new().with_response(GENERATE_URL, generate_body());
        let provider = GeminiProvider::with_base_url(client, "test-key", BASE);

        let file = UploadedFile::new("files/abc123", "https://gemini.test/f/abc123", "application/pdf");
        let answer = provider
            .generate_content(
                DEFAULT_GEMINI_MODEL,
                vec![ContentPart::file(&file), ContentPart::text("Задай вопросы")],
            )
            .await
            .unwrap();

        assert_eq!(answer.text, "1. Почему выбрана эта тема?");
        assert_eq!(answer.model, "gemini-1.5-flash-002");
        assert_eq!(answer.usage.unwrap().total_tokens, 320);

        let body = provider.client.requests()[0].json.clone().unwrap();
        let parts = &body["contents"][0]["parts"];
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(parts[0]["fileData"]["fileUri"], "https://gemini.test/f/abc123");
        assert_eq!(parts[0]["fileData"]["mimeType"], "application/pdf");
        assert_eq!(parts[1]["text"], "Задай вопросы");
    }

    #[tokio::test]
    async fn test_gemini_blocked_candidate_is_error() {
        let client = MockHttpClient::new().with_response(
            GENERATE_URL,
            serde_json::json!({"candidates": [{"finishReason": "SAFETY"}]}),
        );
        let provider = GeminiProvider::with_base_url(client, "test-key", BASE);

        let error = provider
            .generate_content(DEFAULT_GEMINI_MODEL, vec![ContentPart::text("x")])
            .await
            .unwrap_err();

        assert!(error.to_string().contains("SAFETY"));
    }

    #[tokio::test]
    async fn test_gemini_error_handling() {
        let client = MockHttpClient::new().with_error(GENERATE_URL, "HTTP 403: quota");
        let provider = GeminiProvider::with_base_url(client, "test-key", BASE);

        let result = provider
            .generate_content(DEFAULT_GEMINI_MODEL, vec![ContentPart::text("x")])
            .await;

        assert!(result.unwrap_err().is_provider());
    }

    #[tokio::test]
    async fn test_gemini_resumable_upload_against_http_server() {
        use crate::infrastructure::llm::HttpClient;
        use wiremock::matchers::{header, headers, method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        let server = MockServer::start().await;
        let session_url = format!("{}/upload/session/xyz", server.uri());

        Mock::given(method("POST"))
            .and(path("/upload/v1beta/files"))
            .and(header("x-goog-api-key", "test-key"))
            .and(header("X-Goog-Upload-Command", "start"))
            .respond_with(
                ResponseTemplate::new(200).insert_header(UPLOAD_URL_HEADER, session_url.as_str()),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/upload/session/xyz"))
            .and(headers("X-Goog-Upload-Command", vec!["upload", "finalize"]))
            .respond_with(ResponseTemplate::new(200).set_body_json(upload_body()))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let provider = GeminiProvider::with_base_url(HttpClient::new(), "test-key", server.uri());
        let file = provider
            .upload_file(&path, "application/pdf", "a.pdf")
            .await
            .unwrap();

        assert_eq!(file.name, "files/abc123");
    }

    #[tokio::test]
    async fn test_transport_failure_does_not_expose_key() {
        use crate::infrastructure::llm::HttpClient;

        let provider = GeminiProvider::with_base_url(
            HttpClient::new(),
            "SECRET-KEY-123",
            "http://127.0.0.1:1",
        );

        let error = provider
            .generate_content(DEFAULT_GEMINI_MODEL, vec![ContentPart::text("x")])
            .await
            .unwrap_err();
        assert!(error.is_provider());
        assert!(!error.to_string().contains("SECRET-KEY-123"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let error = provider
            .upload_file(&path, "application/pdf", "a.pdf")
            .await
            .unwrap_err();
        assert!(!error.to_string().contains("SECRET-KEY-123"));
    }
}
