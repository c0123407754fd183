//! Uploaded documents staged as scoped temporary files

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::questions::Document;
use crate::domain::DomainError;

const STAGED_PREFIX: &str = "questions-";

/// A document written to the staging directory; the file is removed on drop
#[derive(Debug)]
pub struct StagedDocument {
    file: NamedTempFile,
}

impl StagedDocument {
    /// Write the document into `dir` under a unique name keeping its extension
    pub async fn stage(dir: &Path, document: &Document) -> Result<Self, DomainError> {
        let dir: PathBuf = dir.to_path_buf();
        let suffix = format!(".{}", document.extension());
        let content = document.content.clone();

        let file = tokio::task::spawn_blocking(move || -> std::io::Result<NamedTempFile> {
            let mut file = tempfile::Builder::new()
                .prefix(STAGED_PREFIX)
                .suffix(&suffix)
                .tempfile_in(&dir)?;

            file.write_all(&content)?;
            file.flush()?;

            Ok(file)
        })
        .await
        .map_err(|e| DomainError::staging(format!("Staging task failed: {}", e)))?
        .map_err(|e| DomainError::staging(format!("Failed to stage document: {}", e)))?;

        tracing::debug!(path = %file.path().display(), bytes = document.len(), "Document staged");

        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now, surfacing any removal error
    pub fn close(self) -> Result<(), DomainError> {
        let path = self.file.path().to_path_buf();

        self.file.close().map_err(|e| {
            DomainError::staging(format!("Failed to remove {}: {}", path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged_files(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    #[tokio::test]
    async fn test_stage_writes_content_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(&b"%PDF-1.4 body"[..]).with_file_name("Defense.PPTX");

        let staged = StagedDocument::stage(dir.path(), &document).await.unwrap();

        let name = staged.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("questions-"));
        assert!(name.ends_with(".pptx"));
        assert_eq!(std::fs::read(staged.path()).unwrap(), b"%PDF-1.4 body");
    }

    #[tokio::test]
    async fn test_close_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let staged = StagedDocument::stage(dir.path(), &Document::new("x")).await.unwrap();
        let path = staged.path().to_path_buf();

        staged.close().unwrap();

        assert!(!path.exists());
        assert!(staged_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();

        {
            let _staged = StagedDocument::stage(dir.path(), &Document::new("x")).await.unwrap();
            assert_eq!(staged_files(dir.path()).len(), 1);
        }

        assert!(staged_files(dir.path()).is_empty());
    }

    #[tokio::test]
    async fn test_stage_into_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = StagedDocument::stage(&missing, &Document::new("x")).await;
        assert!(matches!(result, Err(DomainError::Staging { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_stages_get_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new("x");

        let (a, b) = tokio::join!(
            StagedDocument::stage(dir.path(), &document),
            StagedDocument::stage(dir.path(), &document)
        );

        assert_ne!(a.unwrap().path(), b.unwrap().path());
    }
}
