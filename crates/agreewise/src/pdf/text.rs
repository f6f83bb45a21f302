//! Direct extraction from the PDF text layer.

use super::backend::PdfBackend;

/// Outcome of reading a PDF's text layer.
///
/// `InsufficientText` is an expected outcome (scanned documents have no text
/// layer), not an error: the caller reacts by switching to OCR.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PdfTextOutcome {
    Extracted(String),
    InsufficientText,
}

impl PdfTextOutcome {
    pub fn into_text(self) -> Option<String> {
        match self {
            PdfTextOutcome::Extracted(text) => Some(text),
            PdfTextOutcome::InsufficientText => None,
        }
    }
}

/// Read every page's text layer and decide whether it is usable.
///
/// Pages are joined with a blank line, skipping pages without text. A page that
/// fails to extract is logged and skipped. If the document cannot be opened, or
/// the trimmed text is shorter than `min_chars` characters, the result is
/// [`PdfTextOutcome::InsufficientText`].
pub fn extract_pdf_text(backend: &dyn PdfBackend, pdf_bytes: &[u8], min_chars: usize) -> PdfTextOutcome {
    let pages = match backend.page_texts(pdf_bytes) {
        Ok(pages) => pages,
        Err(e) => {
            tracing::warn!("PDF text layer could not be read: {}", e);
            return PdfTextOutcome::InsufficientText;
        }
    };

    let mut blocks = Vec::with_capacity(pages.len());
    for (index, page) in pages.into_iter().enumerate() {
        match page {
            Ok(text) if !text.is_empty() => blocks.push(text),
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping text layer of page {}: {}", index + 1, e),
        }
    }

    let text = blocks.join("\n\n");
    let usable_chars = text.trim().chars().count();

    if usable_chars < min_chars {
        tracing::debug!(
            "PDF text layer has {} characters (minimum {}), treating as scanned",
            usable_chars,
            min_chars
        );
        return PdfTextOutcome::InsufficientText;
    }

    PdfTextOutcome::Extracted(text)
}
