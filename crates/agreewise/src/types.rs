use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker placed between pages when a multi-file submission is joined into one document.
pub const PAGE_BREAK_MARKER: &str = "\n\n--- PAGE BREAK ---\n\n";

/// Which branch of the pipeline produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    DocxExtraction,
    PdfExtraction,
    PdfOcr,
    ImageOcr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::DocxExtraction => "docx_extraction",
            ExtractionMethod::PdfExtraction => "pdf_extraction",
            ExtractionMethod::PdfOcr => "pdf_ocr",
            ExtractionMethod::ImageOcr => "image_ocr",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-file result record returned by the pipeline coordinator.
///
/// The coordinator never returns `Err`; failures are reported here with
/// `success == false`, the error message in `error`, and every other field empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,
    pub text: String,
    pub method: Option<ExtractionMethod>,
    pub file_type: Option<String>,
    pub char_count: usize,
    pub error: Option<String>,
}

impl ExtractionResult {
    /// Build a successful result; `char_count` is derived from `text`.
    pub fn succeeded(text: String, method: ExtractionMethod, file_type: impl Into<String>) -> Self {
        let char_count = text.chars().count();
        Self {
            success: true,
            text,
            method: Some(method),
            file_type: Some(file_type.into()),
            char_count,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: String::new(),
            method: None,
            file_type: None,
            char_count: 0,
            error: Some(error.into()),
        }
    }
}

/// One file of a multi-file submission after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based position in upload order.
    pub page_number: usize,
    pub filename: String,
    pub text: String,
    pub mime_type: String,
    pub method: ExtractionMethod,
    pub char_count: usize,
}

/// A multi-file submission reconstructed into a single document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDocument {
    pub pages: Vec<Page>,
    /// Page texts in upload order joined with [`PAGE_BREAK_MARKER`].
    pub full_text: String,
    pub total_chars: usize,
}

impl BatchDocument {
    pub fn from_pages(pages: Vec<Page>) -> Self {
        let full_text = pages
            .iter()
            .map(|page| page.text.as_str())
            .collect::<Vec<_>>()
            .join(PAGE_BREAK_MARKER);
        let total_chars = full_text.chars().count();

        Self {
            pages,
            full_text,
            total_chars,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
