//! Content-based MIME type detection.
//!
//! Uploaded files arrive under temporary names, so the extension is never trusted:
//! the type comes from the file's leading bytes (`infer` matchers), with a look
//! inside ZIP containers for Word documents.

use crate::Result;
use crate::core::io::read_file_sync;
use std::path::Path;

pub const PDF_MIME_TYPE: &str = "application/pdf";
pub const DOCX_MIME_TYPE: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const LEGACY_WORD_MIME_TYPE: &str = "application/msword";
pub const PLAIN_TEXT_MIME_TYPE: &str = "text/plain";
pub const ZIP_MIME_TYPE: &str = "application/zip";
pub const EMPTY_MIME_TYPE: &str = "application/x-empty";
pub const OCTET_STREAM_MIME_TYPE: &str = "application/octet-stream";

/// Extraction branch selected for a detected MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    Pdf,
    /// Any `image/*` type; the full MIME type is kept for reporting.
    Image(String),
    Unsupported(String),
}

impl DocumentKind {
    pub fn from_mime(mime_type: &str) -> Self {
        match mime_type {
            DOCX_MIME_TYPE => DocumentKind::Docx,
            PDF_MIME_TYPE => DocumentKind::Pdf,
            image if image.starts_with("image/") => DocumentKind::Image(image.to_string()),
            other => DocumentKind::Unsupported(other.to_string()),
        }
    }
}

/// Detect the MIME type of a file from its content.
///
/// # Errors
///
/// Returns `AgreewiseError::Io` if the file can't be read.
pub fn detect_mime_type(path: impl AsRef<Path>) -> Result<String> {
    let bytes = read_file_sync(path)?;
    Ok(detect_mime_type_from_bytes(&bytes))
}

/// Detect the MIME type of in-memory content.
///
/// Unknown content is reported as `application/x-empty` (no bytes), `text/plain`
/// (valid UTF-8) or `application/octet-stream`.
pub fn detect_mime_type_from_bytes(content: &[u8]) -> String {
    if content.is_empty() {
        return EMPTY_MIME_TYPE.to_string();
    }

    if let Some(kind) = infer::get(content) {
        let mime = kind.mime_type();
        if mime == ZIP_MIME_TYPE && zip_contains_word_document(content) {
            return DOCX_MIME_TYPE.to_string();
        }
        return mime.to_string();
    }

    if std::str::from_utf8(content).is_ok() {
        PLAIN_TEXT_MIME_TYPE.to_string()
    } else {
        OCTET_STREAM_MIME_TYPE.to_string()
    }
}

#[cfg(feature = "office")]
fn zip_contains_word_document(content: &[u8]) -> bool {
    match zip::ZipArchive::new(std::io::Cursor::new(content)) {
        Ok(archive) => archive.file_names().any(|name| name == "word/document.xml"),
        Err(e) => {
            tracing::debug!("ZIP container could not be inspected: {}", e);
            false
        }
    }
}

#[cfg(not(feature = "office"))]
fn zip_contains_word_document(_content: &[u8]) -> bool {
    false
}
