//! Format-specific extractors that read text directly, without OCR.

#[cfg(feature = "office")]
pub mod docx;

#[cfg(feature = "office")]
pub use docx::{extract_docx, extract_docx_bytes};

/// Fallback when the crate is built without DOCX support.
#[cfg(not(feature = "office"))]
pub fn extract_docx_bytes(_bytes: &[u8]) -> crate::Result<String> {
    Err(crate::AgreewiseError::MissingDependency(
        "DOCX extraction requires the 'office' feature".to_string(),
    ))
}
