//! Router test fixtures

use std::path::PathBuf;
use std::sync::Arc;

use axum::{body::Body, response::Response};

use super::state::AppState;
use crate::domain::llm::{MockCompletionProvider, MockMultimodalProvider};
use crate::domain::{CompletionProvider, MultimodalProvider};
use crate::infrastructure::auth::{SessionConfig, SessionService};
use crate::infrastructure::services::{QuestionService, SourceService};
use crate::infrastructure::user::{Argon2Hasher, InMemoryUserRepository, UserService};

pub const TEST_SESSION_SECRET: &str = "router-test-secret";

pub struct TestStateBuilder {
    completion: Arc<dyn CompletionProvider>,
    multimodal: Arc<dyn MultimodalProvider>,
    staging_dir: PathBuf,
}

impl TestStateBuilder {
    pub fn with_completion(mut self, provider: Arc<dyn CompletionProvider>) -> Self {
        self.completion = provider;
        self
    }

    pub fn with_multimodal(mut self, provider: Arc<dyn MultimodalProvider>) -> Self {
        self.multimodal = provider;
        self
    }

    pub fn with_staging_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_dir = dir.into();
        self
    }

    pub fn build(self) -> AppState {
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2Hasher::new()),
        );

        AppState::new(
            SourceService::new(self.completion),
            QuestionService::new(self.multimodal, "gemini-test", self.staging_dir),
            users,
            Arc::new(SessionService::new(SessionConfig::new(TEST_SESSION_SECRET))),
        )
    }
}

pub fn test_state() -> TestStateBuilder {
    TestStateBuilder {
        completion: Arc::new(MockCompletionProvider::new("yandex").with_answer("ok")),
        multimodal: Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok")),
        staging_dir: std::env::temp_dir(),
    }
}

pub async fn read_body(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn read_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&read_body(response).await).unwrap()
}

/// Build a multipart/form-data body from `(name, file_name, content)` parts
pub fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Body {
    let mut body = Vec::new();

    for (name, file_name, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());

        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
            }
            None => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                        .as_bytes(),
                );
            }
        }

        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    Body::from(body)
}
