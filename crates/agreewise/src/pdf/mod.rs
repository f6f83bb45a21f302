//! PDF processing: text-layer extraction and the rasterize + OCR fallback.
//!
//! Both go through the [`PdfBackend`] seam. The Pdfium implementation,
//! [`PdfiumBackend`], requires the `pdf` feature and a Pdfium shared library
//! (looked up in `PDFIUM_LIB_DIR` or the working directory, then system paths).
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "pdf")]
//! # fn example() -> agreewise::Result<()> {
//! use agreewise::pdf::{PdfTextOutcome, PdfiumBackend, extract_pdf_text};
//!
//! let pdf_bytes = std::fs::read("lease.pdf")?;
//! match extract_pdf_text(&PdfiumBackend::new(), &pdf_bytes, 50) {
//!     PdfTextOutcome::Extracted(text) => println!("{}", text),
//!     PdfTextOutcome::InsufficientText => println!("scanned document, needs OCR"),
//! }
//! # Ok(())
//! # }
//! ```
pub mod backend;
#[cfg(feature = "pdf")]
mod bindings;
pub mod error;
pub mod rendering;
pub mod text;

pub use backend::PdfBackend;
#[cfg(feature = "pdf")]
pub use backend::PdfiumBackend;
pub use error::PdfError;
pub use rendering::ocr_pdf;
pub use text::{PdfTextOutcome, extract_pdf_text};
