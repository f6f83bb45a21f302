//! OCR (Optical Character Recognition) subsystem.
//!
//! Recognition engines sit behind [`RecognizerFactory`] / [`TextRecognizer`]. The
//! loaded model is held by a [`ModelCache`], shared process-wide by default.
//!
//! # Optional Feature
//!
//! The Tesseract engine requires the `ocr` feature:
//! ```toml
//! [dependencies]
//! agreewise = { version = "0.3", features = ["ocr"] }
//! ```
//! Without it no default model cache exists and callers must inject one.
pub mod cache;
pub mod error;
pub mod image;
pub mod language;
pub mod recognizer;
#[cfg(feature = "ocr")]
pub mod tesseract_backend;

pub use cache::ModelCache;
pub use error::OcrError;
pub use image::ocr_image;
pub use language::LanguageTable;
pub use recognizer::{RecognizerFactory, TextRecognizer, paragraph_blocks};
#[cfg(feature = "ocr")]
pub use tesseract_backend::{TesseractFactory, TesseractRecognizer};

#[cfg(feature = "ocr")]
static DEFAULT_MODEL_CACHE: once_cell::sync::Lazy<std::sync::Arc<ModelCache>> =
    once_cell::sync::Lazy::new(|| std::sync::Arc::new(ModelCache::new(TesseractFactory::default())));

/// Process-wide Tesseract model cache.
#[cfg(feature = "ocr")]
pub fn default_model_cache() -> std::sync::Arc<ModelCache> {
    std::sync::Arc::clone(&DEFAULT_MODEL_CACHE)
}
