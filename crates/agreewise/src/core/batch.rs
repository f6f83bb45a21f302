//! Multi-file submissions.
//!
//! A contract photographed page by page arrives as several files. They are
//! extracted in upload order and joined back into one document, separated by
//! [`PAGE_BREAK_MARKER`](crate::types::PAGE_BREAK_MARKER). The whole submission
//! fails if any page fails.

use crate::core::io::SourceFile;
use crate::core::processor::DocumentProcessor;
use crate::types::{BatchDocument, Page};
use crate::{AgreewiseError, Result};

impl DocumentProcessor {
    /// Extract every file in order and join the pages into one document.
    ///
    /// The batch takes ownership of `files`; temporary ones are deleted before
    /// this returns, whether the batch succeeded or not.
    ///
    /// # Errors
    ///
    /// - `AgreewiseError::Validation` if `files` is empty
    /// - `AgreewiseError::Batch` naming the first page that failed; later pages are not processed
    pub fn process_batch(&self, files: Vec<SourceFile>, language_hint: Option<&str>) -> Result<BatchDocument> {
        if files.is_empty() {
            return Err(AgreewiseError::validation("No files provided"));
        }

        let total = files.len();
        let mut pages = Vec::with_capacity(total);

        for (index, file) in files.iter().enumerate() {
            let page_number = index + 1;
            tracing::debug!("Processing page {}/{}: {}", page_number, total, file.filename());

            let result = self.process(file.path(), language_hint);
            let failure = |message: String| AgreewiseError::Batch {
                page_number,
                filename: file.filename().to_string(),
                message,
            };

            if !result.success {
                return Err(failure(result.error.unwrap_or_default()));
            }

            let (Some(method), Some(mime_type)) = (result.method, result.file_type) else {
                return Err(failure("extraction reported success without a method".to_string()));
            };

            pages.push(Page {
                page_number,
                filename: file.filename().to_string(),
                text: result.text,
                mime_type,
                method,
                char_count: result.char_count,
            });
        }

        drop(files);

        let document = BatchDocument::from_pages(pages);
        tracing::info!(
            "Combined {} pages into {} characters",
            document.page_count(),
            document.total_chars
        );
        Ok(document)
    }
}

/// Process a multi-file submission with the default processor.
pub fn process_batch(files: Vec<SourceFile>, language_hint: Option<&str>) -> Result<BatchDocument> {
    DocumentProcessor::default().process_batch(files, language_hint)
}

#[cfg(feature = "tokio-runtime")]
impl DocumentProcessor {
    /// Run [`process_batch`](Self::process_batch) on the blocking thread pool.
    pub async fn process_batch_async(
        &self,
        files: Vec<SourceFile>,
        language_hint: Option<String>,
    ) -> Result<BatchDocument> {
        let processor = self.clone();

        tokio::task::spawn_blocking(move || processor.process_batch(files, language_hint.as_deref()))
            .await
            .map_err(|e| AgreewiseError::Other(format!("Batch task failed: {}", e)))?
    }
}

/// Async counterpart of [`process_batch`].
#[cfg(feature = "tokio-runtime")]
pub async fn process_batch_async(files: Vec<SourceFile>, language_hint: Option<String>) -> Result<BatchDocument> {
    DocumentProcessor::default().process_batch_async(files, language_hint).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_empty_batch_is_rejected() {
        let err = DocumentProcessor::default().process_batch(Vec::new(), None).unwrap_err();
        assert!(matches!(err, AgreewiseError::Validation { .. }));
    }

    #[test]
    fn test_failure_names_page_and_cleans_up() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("upload-0");
        fs::write(&path, "plain text is not a contract format").unwrap();

        let err = process_batch(vec![SourceFile::temporary(&path, "notes.txt")], Some("en")).unwrap_err();
        match err {
            AgreewiseError::Batch {
                page_number,
                filename,
                message,
            } => {
                assert_eq!(page_number, 1);
                assert_eq!(filename, "notes.txt");
                assert_eq!(message, "Unsupported file type: text/plain");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!path.exists());
    }
}
