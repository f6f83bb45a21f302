//! Error types for AgreeWise.
//!
//! Every fallible operation in the library returns [`AgreewiseError`]:
//!
//! - `Io` wraps `std::io::Error` unchanged. Unreadable or missing files surface as-is.
//! - `Parsing`, `Ocr`, `Validation`, `Serialization` carry a message and an optional source.
//! - `UnsupportedFormat` carries the detected MIME type that no branch handles.
//! - `Batch` pins a failure to one page of a multi-file submission.
//!
//! "Not enough text in the PDF text layer" is not an error; see
//! [`crate::pdf::PdfTextOutcome`].
use thiserror::Error;

/// Result type alias using `AgreewiseError`.
pub type Result<T> = std::result::Result<T, AgreewiseError>;

/// Main error type for all AgreeWise operations.
#[derive(Debug, Error)]
pub enum AgreewiseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Failed to process page {page_number} ({filename}): {message}")]
    Batch {
        page_number: usize,
        filename: String,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AgreewiseError {
    fn from(err: serde_json::Error) -> Self {
        AgreewiseError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::pdf::PdfError> for AgreewiseError {
    fn from(err: crate::pdf::PdfError) -> Self {
        AgreewiseError::Parsing {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<crate::ocr::OcrError> for AgreewiseError {
    fn from(err: crate::ocr::OcrError) -> Self {
        AgreewiseError::Ocr {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<image::ImageError> for AgreewiseError {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io_err) => AgreewiseError::Io(io_err),
            other => AgreewiseError::Parsing {
                message: format!("Image processing failed: {}", other),
                source: Some(Box::new(other)),
            },
        }
    }
}

macro_rules! error_constructor {
    ($name:ident, $variant:ident) => {
        pastey::paste! {
            #[doc = "Create a " $variant " error"]
            pub fn $name<S: Into<String>>(message: S) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: None,
                }
            }

            #[doc = "Create a " $variant " error with source"]
            pub fn [<$name _with_source>]<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
                message: S,
                source: E,
            ) -> Self {
                Self::$variant {
                    message: message.into(),
                    source: Some(Box::new(source)),
                }
            }
        }
    };
}

impl AgreewiseError {
    error_constructor!(parsing, Parsing);
    error_constructor!(ocr, Ocr);
    error_constructor!(validation, Validation);
    error_constructor!(serialization, Serialization);
}
