//! OCR fallback for PDFs without a usable text layer.

use super::backend::PdfBackend;
use crate::ocr::{LanguageTable, ModelCache, ocr_image};
use crate::{AgreewiseError, Result};

/// Rasterize every page and recognize its text.
///
/// Pages are rendered at `dpi` strictly in page order. Each page image lives in a
/// temporary PNG that is removed once its OCR pass finishes, whether or not it
/// succeeded. Pages that yield no text are skipped; the rest are joined with a
/// blank line.
///
/// # Errors
///
/// A page that cannot be rendered or recognized fails the whole document.
pub fn ocr_pdf(
    backend: &dyn PdfBackend,
    models: &ModelCache,
    pdf_bytes: &[u8],
    language_hint: &str,
    languages: &LanguageTable,
    dpi: u16,
) -> Result<String> {
    let page_count = backend.page_count(pdf_bytes)?;
    tracing::debug!("Rendering {} PDF pages at {} DPI for OCR", page_count, dpi);

    let mut page_texts = Vec::with_capacity(page_count);

    for page_index in 0..page_count {
        let image = backend.render_page(pdf_bytes, page_index, dpi)?;

        let page_file = tempfile::Builder::new()
            .prefix("agreewise-page-")
            .suffix(".png")
            .tempfile()?
            .into_temp_path();

        image
            .save_with_format(&page_file, image::ImageFormat::Png)
            .map_err(|e| {
                AgreewiseError::parsing_with_source(format!("Failed to write page {} image", page_index + 1), e)
            })?;

        let text = ocr_image(models, &page_file, language_hint, languages)?;

        if let Err(e) = page_file.close() {
            tracing::warn!("Failed to remove page image for page {}: {}", page_index + 1, e);
        }

        if !text.is_empty() {
            page_texts.push(text);
        }
    }

    Ok(page_texts.join("\n\n"))
}
