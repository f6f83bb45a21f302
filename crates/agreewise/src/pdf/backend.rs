//! The PDF engine seam.
//!
//! Text extraction and rasterization only need three things from a PDF library,
//! so they talk to it through [`PdfBackend`]. [`PdfiumBackend`] is the production
//! implementation; tests substitute their own.

use super::error::Result;
use image::DynamicImage;

/// Operations the pipeline needs from a PDF engine.
pub trait PdfBackend: Send + Sync {
    /// Number of pages in the document.
    fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize>;

    /// Text layer of every page in page order.
    ///
    /// The outer error means the document could not be opened; an inner error
    /// affects only that page.
    fn page_texts(&self, pdf_bytes: &[u8]) -> Result<Vec<Result<String>>>;

    /// Render one page (0-based) at the given resolution.
    fn render_page(&self, pdf_bytes: &[u8], page_index: usize, dpi: u16) -> Result<DynamicImage>;
}

#[cfg(feature = "pdf")]
pub use pdfium::PdfiumBackend;

#[cfg(feature = "pdf")]
mod pdfium {
    use super::PdfBackend;
    use crate::pdf::bindings::bind_pdfium;
    use crate::pdf::error::{PdfError, Result};
    use image::DynamicImage;
    use pdfium_render::prelude::*;

    const PDF_POINTS_PER_INCH: f32 = 72.0;

    /// [`PdfBackend`] backed by the Pdfium library.
    ///
    /// Holds no library handle; each call binds through the cached initialization state.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct PdfiumBackend;

    impl PdfiumBackend {
        pub fn new() -> Self {
            Self
        }

        fn pdfium(map_err: fn(String) -> PdfError, context: &'static str) -> Result<Pdfium> {
            Ok(Pdfium::new(bind_pdfium(map_err, context)?))
        }
    }

    fn load_error(err: PdfiumError) -> PdfError {
        let err_msg = err.to_string();
        if err_msg.contains("password") || err_msg.contains("Password") {
            PdfError::PasswordRequired
        } else {
            PdfError::InvalidPdf(err_msg)
        }
    }

    impl PdfBackend for PdfiumBackend {
        fn page_count(&self, pdf_bytes: &[u8]) -> Result<usize> {
            let pdfium = Self::pdfium(PdfError::LibraryUnavailable, "page count")?;
            let document = pdfium.load_pdf_from_byte_slice(pdf_bytes, None).map_err(load_error)?;
            Ok(document.pages().len() as usize)
        }

        fn page_texts(&self, pdf_bytes: &[u8]) -> Result<Vec<Result<String>>> {
            let pdfium = Self::pdfium(PdfError::LibraryUnavailable, "text extraction")?;
            let document = pdfium.load_pdf_from_byte_slice(pdf_bytes, None).map_err(load_error)?;

            let texts = document
                .pages()
                .iter()
                .map(|page| {
                    page.text()
                        .map(|text| text.all())
                        .map_err(|e| PdfError::TextExtractionFailed(e.to_string()))
                })
                .collect();

            Ok(texts)
        }

        fn render_page(&self, pdf_bytes: &[u8], page_index: usize, dpi: u16) -> Result<DynamicImage> {
            let pdfium = Self::pdfium(PdfError::LibraryUnavailable, "page rendering")?;
            let document = pdfium.load_pdf_from_byte_slice(pdf_bytes, None).map_err(load_error)?;

            let page = document
                .pages()
                .get(page_index as u16)
                .map_err(|_| PdfError::PageNotFound(page_index))?;

            let scale = f32::from(dpi) / PDF_POINTS_PER_INCH;
            let config = PdfRenderConfig::new()
                .set_target_width(((page.width().value * scale) as i32).max(1))
                .set_target_height(((page.height().value * scale) as i32).max(1))
                .rotate_if_landscape(PdfPageRenderRotation::None, false);

            let bitmap = page
                .render_with_config(&config)
                .map_err(|e| PdfError::RenderingFailed(format!("Failed to render page {}: {}", page_index + 1, e)))?;

            Ok(DynamicImage::ImageRgb8(bitmap.as_image().into_rgb8()))
        }
    }

}
