//! Question generation request

use bytes::Bytes;
use std::path::Path;

/// Question count used when the client does not send `max_questions`
pub const DEFAULT_MAX_QUESTIONS: u32 = 10;

const DEFAULT_EXTENSION: &str = "pdf";
const DEFAULT_MIME_TYPE: &str = "application/pdf";
const GENERIC_MIME_TYPE: &str = "application/octet-stream";

/// An uploaded document as received from the client
#[derive(Debug, Clone)]
pub struct Document {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub content: Bytes,
}

impl Document {
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self {
            file_name: None,
            content_type: None,
            content: content.into(),
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// File extension used for the staged copy, `pdf` unless the upload names another
    pub fn extension(&self) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| DEFAULT_EXTENSION.to_string())
    }

    /// Declared content type, else a guess from the file name, else PDF
    pub fn mime_type(&self) -> String {
        if let Some(declared) = self
            .content_type
            .as_deref()
            .map(str::trim)
            .filter(|ct| !ct.is_empty() && *ct != GENERIC_MIME_TYPE)
        {
            return declared.to_string();
        }

        self.file_name
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|mime| mime.essence_str().to_string())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string())
    }

    /// Name shown on the provider side
    pub fn display_name(&self) -> String {
        self.file_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| format!("document.{}", self.extension()))
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Fields of a `POST /questions` form
#[derive(Debug, Clone)]
pub struct QuestionRequest {
    pub document: Option<Document>,
    pub max_questions: u32,
}

impl QuestionRequest {
    pub fn new(document: Document) -> Self {
        Self {
            document: Some(document),
            max_questions: DEFAULT_MAX_QUESTIONS,
        }
    }

    pub fn with_max_questions(mut self, max_questions: u32) -> Self {
        self.max_questions = max_questions;
        self
    }
}

/// Parse the `max_questions` form value; anything that is not a positive integer falls back to the default
pub fn parse_max_questions(raw: Option<&str>) -> u32 {
    raw.map(str::trim)
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(DEFAULT_MAX_QUESTIONS)
}
