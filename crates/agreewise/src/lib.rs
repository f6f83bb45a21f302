//! AgreeWise - document ingestion for plain-language contract analysis
//!
//! Turns an uploaded contract (a Word document, a digital or scanned PDF, or a
//! phone photo of a page) into clean text ready for analysis. The pipeline picks
//! an extraction strategy from the file's content and falls back to OCR when a
//! PDF has no usable text layer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agreewise::{SourceFile, process_batch, process_document};
//!
//! # fn main() -> agreewise::Result<()> {
//! // One file
//! let result = process_document("lease.pdf", Some("en"));
//! println!("{:?}: {}", result.method, result.text);
//!
//! // Several photographed pages, in order
//! let pages = vec![SourceFile::persistent("page1.jpg"), SourceFile::persistent("page2.jpg")];
//! let document = process_batch(pages, Some("en"))?;
//! println!("{}", document.full_text);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Core** (`core`): MIME detection, the pipeline coordinator, batches, config, I/O
//! - **Extraction** (`extraction`): DOCX paragraphs and tables
//! - **PDF** (`pdf`): text layer and the rasterize + OCR fallback behind [`pdf::PdfBackend`]
//! - **OCR** (`ocr`): language table, cached recognition model, Tesseract engine
//! - **Text** (`text`): whitespace normalization
//! - **Analysis** (`analysis`): the analysis document model and its helpers
//!
//! # Features
//!
//! - `office` (default): DOCX extraction
//! - `tokio-runtime` (default): async wrappers running on the blocking pool
//! - `pdf`: Pdfium-based PDF text and rendering
//! - `ocr`: Tesseract recognition
//! - `full`: all of the above

#![deny(unsafe_code)]

pub mod analysis;
pub mod core;
pub mod error;
pub mod extraction;
pub mod ocr;
pub mod pdf;
pub mod text;
pub mod types;

pub use error::{AgreewiseError, Result};
pub use types::*;

pub use analysis::{AnalysisDocument, prepare_contract_text};
pub use core::config::ExtractionConfig;
pub use core::io::SourceFile;
pub use core::mime::{DOCX_MIME_TYPE, PDF_MIME_TYPE, PLAIN_TEXT_MIME_TYPE, detect_mime_type};
pub use core::processor::{DocumentProcessor, process_document};
pub use core::batch::process_batch;

#[cfg(feature = "tokio-runtime")]
pub use core::batch::process_batch_async;
#[cfg(feature = "tokio-runtime")]
pub use core::processor::process_document_async;
