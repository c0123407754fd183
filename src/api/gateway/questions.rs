use axum::extract::{
    multipart::{Multipart, MultipartError, MultipartRejection},
    State,
};
use tracing::{debug, warn};

use crate::api::state::AppState;
use crate::api::types::AnswerEnvelope;
use crate::domain::questions::{parse_max_questions, Document, QuestionRequest};

const FILE_FIELD: &str = "file";
const MAX_QUESTIONS_FIELD: &str = "max_questions";

/// POST /questions
///
/// Multipart form with a `file` part and an optional `max_questions` field.
pub async fn generate_questions(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AnswerEnvelope {
    let multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            warn!(reason = %rejection.body_text(), "Question request is not a multipart form");
            return AnswerEnvelope::error();
        }
    };

    let request = match read_form(multipart).await {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "Failed to read question form");
            return AnswerEnvelope::error();
        }
    };

    debug!(
        has_document = request.document.is_some(),
        max_questions = request.max_questions,
        "Question generation requested"
    );

    state.question_service.generate(request).await.into()
}

async fn read_form(mut multipart: Multipart) -> Result<QuestionRequest, MultipartError> {
    let mut document = None;
    let mut max_questions = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some(FILE_FIELD) => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let content = field.bytes().await?;

                let mut uploaded = Document::new(content);
                if let Some(file_name) = file_name {
                    uploaded = uploaded.with_file_name(file_name);
                }
                if let Some(content_type) = content_type {
                    uploaded = uploaded.with_content_type(content_type);
                }
                document = Some(uploaded);
            }
            Some(MAX_QUESTIONS_FIELD) => {
                max_questions = Some(field.text().await?);
            }
            _ => {}
        }
    }

    Ok(QuestionRequest {
        document,
        max_questions: parse_max_questions(max_questions.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use tempfile::TempDir;
    use tower::ServiceExt;

    use super::*;
    use crate::api::test_support::{multipart_body, read_json, test_state};
    use crate::domain::llm::MockMultimodalProvider;
    use crate::domain::ContentPart;

    const BOUNDARY: &str = "X-THESIS-BOUNDARY";

    fn router(provider: Arc<MockMultimodalProvider>, staging: &TempDir) -> Router {
        Router::new()
            .route("/questions", post(generate_questions))
            .with_state(
                test_state()
                    .with_multimodal(provider)
                    .with_staging_dir(staging.path())
                    .build(),
            )
    }

    fn form_request(parts: &[(&str, Option<&str>, &[u8])]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/questions")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(multipart_body(BOUNDARY, parts))
            .unwrap()
    }

    fn prompt_of(provider: &MockMultimodalProvider) -> String {
        let generations = provider.generations();
        generations[0]
            .1
            .iter()
            .find_map(|part| match part {
                ContentPart::Text { text } => Some(text.clone()),
                _ => None,
            })
            .unwrap()
    }

    #[tokio::test]
    async fn test_generate_questions() {
        let staging = TempDir::new().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("1. Почему?"));
        let app = router(provider.clone(), &staging);

        let response = app
            .oneshot(form_request(&[
                ("file", Some("slides.pdf"), b"%PDF-1.4 slides"),
                ("max_questions", None, b"5"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await, serde_json::json!({"answer": "1. Почему?"}));

        let uploads = provider.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].content, b"%PDF-1.4 slides");
        assert_eq!(uploads[0].mime_type, "application/pdf");
        assert!(prompt_of(&provider).contains('5'));
        assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_default_question_count() {
        let staging = TempDir::new().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok"));
        let app = router(provider.clone(), &staging);

        let response = app
            .oneshot(form_request(&[("file", Some("slides.pdf"), b"%PDF")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(prompt_of(&provider).contains("10"));
    }

    #[tokio::test]
    async fn test_missing_file_skips_provider() {
        let staging = TempDir::new().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok"));
        let app = router(provider.clone(), &staging);

        let response = app
            .oneshot(form_request(&[("max_questions", None, b"3")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, serde_json::json!({"answer": "error"}));
        assert!(provider.uploads().is_empty());
        assert!(provider.generations().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_cleans_staging() {
        let staging = TempDir::new().unwrap();
        let provider =
            Arc::new(MockMultimodalProvider::new("gemini").with_generate_error("quota exceeded"));
        let app = router(provider.clone(), &staging);

        let response = app
            .oneshot(form_request(&[("file", Some("slides.pdf"), b"%PDF")]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await, serde_json::json!({"answer": "error"}));
        assert!(provider.uploads()[0].existed);
        assert_eq!(std::fs::read_dir(staging.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_non_multipart_body_is_error_envelope() {
        let staging = TempDir::new().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok"));
        let app = router(provider.clone(), &staging);

        let request = Request::builder()
            .method("POST")
            .uri("/questions")
            .header("content-type", "application/json")
            .body(Body::from("{}"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(provider.uploads().is_empty());
    }
}
