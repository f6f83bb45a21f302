//! Core pipeline module.
//!
//! - **Detection** (`mime`): content-based MIME types and the [`DocumentKind`] dispatch
//! - **Coordination** (`processor`): one file in, one [`ExtractionResult`](crate::ExtractionResult) out
//! - **Batches** (`batch`): multi-file submissions joined into one document
//! - **Configuration** (`config`) and **I/O** (`io`): settings, upload checks and scoped source files
//!
//! # Example
//!
//! ```rust,no_run
//! use agreewise::core::config::ExtractionConfig;
//! use agreewise::core::processor::DocumentProcessor;
//!
//! let config = ExtractionConfig::discover().ok().flatten().unwrap_or_default();
//! let processor = DocumentProcessor::new(config);
//! let result = processor.process("lease.docx", None);
//! println!("{}", result.text);
//! ```

pub mod batch;
pub mod config;
pub mod io;
pub mod mime;
pub mod processor;

pub use batch::process_batch;
#[cfg(feature = "tokio-runtime")]
pub use batch::process_batch_async;
pub use config::{AnalysisConfig, ExtractionConfig, OcrConfig, PdfConfig, UploadConfig};
pub use io::{SourceFile, validate_upload};
pub use mime::{DocumentKind, detect_mime_type, detect_mime_type_from_bytes};
pub use processor::{DocumentProcessor, process_document};
#[cfg(feature = "tokio-runtime")]
pub use processor::process_document_async;
