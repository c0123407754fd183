//! Defense question gateway

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, instrument, warn};

use super::{observe_provider_call, GatewayError};
use crate::domain::questions::{build_question_prompt, Document, QuestionRequest};
use crate::domain::{ContentPart, DomainError, MultimodalProvider, ProviderAnswer};
use crate::infrastructure::staging::StagedDocument;

/// Generates committee questions for an uploaded presentation
#[derive(Debug, Clone)]
pub struct QuestionService {
    provider: Arc<dyn MultimodalProvider>,
    model: String,
    staging_dir: PathBuf,
}

impl QuestionService {
    pub fn new(
        provider: Arc<dyn MultimodalProvider>,
        model: impl Into<String>,
        staging_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            staging_dir: staging_dir.into(),
        }
    }

    #[instrument(skip_all, fields(provider = self.provider.provider_name(), max_questions = request.max_questions))]
    pub async fn generate(&self, request: QuestionRequest) -> Result<ProviderAnswer, GatewayError> {
        let Some(document) = request.document.as_ref() else {
            warn!("Question generation requested without a document");
            return Err(GatewayError::MissingDocument);
        };

        debug!(bytes = document.len(), "Staging uploaded document");

        let staged = StagedDocument::stage(&self.staging_dir, document)
            .await
            .map_err(|e| {
                warn!(error = %e, "Document staging failed");
                GatewayError::Staging(e)
            })?;

        let result = self
            .upload_and_generate(&staged, document, request.max_questions)
            .await;

        if let Err(e) = staged.close() {
            warn!(error = %e, "Staged document cleanup failed");
        }

        result.map_err(|e| {
            warn!(error = %e, "Question generation failed");
            GatewayError::from(e)
        })
    }

    async fn upload_and_generate(
        &self,
        staged: &StagedDocument,
        document: &Document,
        max_questions: u32,
    ) -> Result<ProviderAnswer, DomainError> {
        let provider = self.provider.provider_name();
        let mime_type = document.mime_type();
        let display_name = document.display_name();

        let file = observe_provider_call(
            provider,
            "upload_file",
            self.provider
                .upload_file(staged.path(), &mime_type, &display_name),
        )
        .await?;

        let parts = vec![
            ContentPart::file(&file),
            ContentPart::text(build_question_prompt(max_questions)),
        ];

        observe_provider_call(
            provider,
            "generate_content",
            self.provider.generate_content(&self.model, parts),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::llm::MockMultimodalProvider;
    use crate::domain::questions::DEFAULT_MAX_QUESTIONS;
    use std::path::Path;

    fn is_empty_dir(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    fn document() -> Document {
        Document::new(&b"%PDF-1.4 slides"[..])
            .with_file_name("defense.pdf")
            .with_content_type("application/pdf")
    }

    #[tokio::test]
    async fn test_generate_success_cleans_up() {
        let staging = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("1. Вопрос?"));
        let service = QuestionService::new(provider.clone(), "gemini-1.5-flash", staging.path());

        let request = QuestionRequest::new(document()).with_max_questions(5);
        let answer = service.generate(request).await.unwrap();

        assert_eq!(answer.text, "1. Вопрос?");

        let uploads = provider.uploads();
        assert_eq!(uploads.len(), 1);
        assert!(uploads[0].existed);
        assert_eq!(uploads[0].content, b"%PDF-1.4 slides");
        assert_eq!(uploads[0].mime_type, "application/pdf");
        assert_eq!(uploads[0].display_name, "defense.pdf");
        assert!(uploads[0].path.starts_with(staging.path()));

        let generations = provider.generations();
        assert_eq!(generations[0].0, "gemini-1.5-flash");
        assert!(matches!(generations[0].1[0], ContentPart::File { .. }));
        match &generations[0].1[1] {
            ContentPart::Text { text } => assert!(text.contains("Максимум 5 вопросов")),
            other => panic!("expected prompt text, got {:?}", other),
        }

        assert!(is_empty_dir(staging.path()));
    }

    #[tokio::test]
    async fn test_upload_failure_cleans_up() {
        let staging = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_upload_error("HTTP 403"));
        let service = QuestionService::new(provider.clone(), "gemini-1.5-flash", staging.path());

        let result = service.generate(QuestionRequest::new(document())).await;

        assert!(matches!(result, Err(GatewayError::Provider(_))));
        assert!(provider.uploads()[0].existed);
        assert!(provider.generations().is_empty());
        assert!(is_empty_dir(staging.path()));
    }

    #[tokio::test]
    async fn test_generate_failure_cleans_up() {
        let staging = tempfile::tempdir().unwrap();
        let provider = Arc::new(
            MockMultimodalProvider::new("gemini")
                .with_answer("unused")
                .with_generate_error("quota exceeded"),
        );
        let service = QuestionService::new(provider.clone(), "gemini-1.5-flash", staging.path());

        let result = service.generate(QuestionRequest::new(document())).await;

        assert!(matches!(result, Err(GatewayError::Provider(_))));
        assert_eq!(provider.generations().len(), 1);
        assert!(is_empty_dir(staging.path()));
    }

    #[tokio::test]
    async fn test_default_question_bound() {
        let staging = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok"));
        let service = QuestionService::new(provider.clone(), "gemini-1.5-flash", staging.path());

        service.generate(QuestionRequest::new(document())).await.unwrap();

        let expected = format!("Максимум {} вопросов", DEFAULT_MAX_QUESTIONS);
        match &provider.generations()[0].1[1] {
            ContentPart::Text { text } => assert!(text.contains(&expected)),
            other => panic!("expected prompt text, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_document_skips_provider() {
        let staging = tempfile::tempdir().unwrap();
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok"));
        let service = QuestionService::new(provider.clone(), "gemini-1.5-flash", staging.path());

        let request = QuestionRequest {
            document: None,
            max_questions: DEFAULT_MAX_QUESTIONS,
        };
        let result = service.generate(request).await;

        assert!(matches!(result, Err(GatewayError::MissingDocument)));
        assert!(provider.uploads().is_empty());
    }

    #[tokio::test]
    async fn test_staging_failure() {
        let staging = tempfile::tempdir().unwrap();
        let missing = staging.path().join("gone");
        let provider = Arc::new(MockMultimodalProvider::new("gemini").with_answer("ok"));
        let service = QuestionService::new(provider.clone(), "gemini-1.5-flash", missing);

        let result = service.generate(QuestionRequest::new(document())).await;

        assert!(matches!(result, Err(GatewayError::Staging(_))));
        assert!(provider.uploads().is_empty());
    }
}
