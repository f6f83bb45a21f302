//! The pipeline coordinator.
//!
//! [`DocumentProcessor`] detects a file's type from its content, picks one of the
//! extraction branches, normalizes the text and reports a uniform
//! [`ExtractionResult`]:
//!
//! | detected type | branch                                      | method            |
//! |---------------|---------------------------------------------|-------------------|
//! | DOCX          | paragraphs + table rows                     | `docx_extraction` |
//! | PDF           | text layer                                  | `pdf_extraction`  |
//! | PDF           | text layer too short → rasterize + OCR      | `pdf_ocr`         |
//! | `image/*`     | OCR                                         | `image_ocr`       |
//!
//! Anything else fails with `Unsupported file type: <mime>`.

use crate::core::config::ExtractionConfig;
use crate::core::io::read_file_sync;
use crate::core::mime::{DocumentKind, detect_mime_type_from_bytes};
use crate::extraction::extract_docx_bytes;
use crate::ocr::{LanguageTable, ModelCache, ocr_image};
use crate::pdf::{PdfBackend, PdfTextOutcome, extract_pdf_text, ocr_pdf};
use crate::text::normalize_text;
use crate::types::{ExtractionMethod, ExtractionResult};
use crate::{AgreewiseError, Result};
use std::path::Path;
use std::sync::Arc;

/// Runs the extraction pipeline with a fixed configuration and engine set.
///
/// Engines default to Pdfium (feature `pdf`) and the shared Tesseract model cache
/// (feature `ocr`); either can be replaced with [`with_pdf_backend`](Self::with_pdf_backend)
/// and [`with_model_cache`](Self::with_model_cache).
#[derive(Clone)]
pub struct DocumentProcessor {
    config: ExtractionConfig,
    languages: LanguageTable,
    pdf_backend: Option<Arc<dyn PdfBackend>>,
    models: Option<Arc<ModelCache>>,
}

impl DocumentProcessor {
    pub fn new(config: ExtractionConfig) -> Self {
        let languages = LanguageTable::from_config(&config.ocr);
        let pdf_backend = default_pdf_backend();
        let models = default_models(&config);

        Self {
            config,
            languages,
            pdf_backend,
            models,
        }
    }

    /// Use the given PDF engine instead of the default one.
    pub fn with_pdf_backend(mut self, backend: Arc<dyn PdfBackend>) -> Self {
        self.pdf_backend = Some(backend);
        self
    }

    /// Use the given OCR model cache instead of the default one.
    pub fn with_model_cache(mut self, models: Arc<ModelCache>) -> Self {
        self.models = Some(models);
        self
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    pub fn languages(&self) -> &LanguageTable {
        &self.languages
    }

    /// Extract the text of one file.
    ///
    /// Never fails: every error, including an unreadable file, is reported as a
    /// result with `success == false` and the error message.
    pub fn process(&self, path: impl AsRef<Path>, language_hint: Option<&str>) -> ExtractionResult {
        let path = path.as_ref();
        let language = self.config.language_or_default(language_hint);

        match self.try_process(path, language) {
            Ok(result) => {
                tracing::info!(
                    "Extracted {} characters from {} via {}",
                    result.char_count,
                    path.display(),
                    result.method.map_or("unknown", |method| method.as_str())
                );
                result
            }
            Err(e) => {
                tracing::warn!("Extraction failed for {}: {}", path.display(), e);
                ExtractionResult::failed(e.to_string())
            }
        }
    }

    /// Like [`process`](Self::process), but errors are returned instead of recorded.
    ///
    /// The file is read once; type detection and the DOCX and PDF branches all
    /// work on those bytes. The recognizer decodes images from the path.
    pub fn try_process(&self, path: &Path, language: &str) -> Result<ExtractionResult> {
        let content = read_file_sync(path)?;
        let mime_type = detect_mime_type_from_bytes(&content);
        let kind = DocumentKind::from_mime(&mime_type);
        tracing::debug!("Detected {} for {}", mime_type, path.display());

        let (text, method) = match kind {
            DocumentKind::Docx => (extract_docx_bytes(&content)?, ExtractionMethod::DocxExtraction),
            DocumentKind::Pdf => self.extract_pdf(path, &content, language)?,
            DocumentKind::Image(_) => (
                ocr_image(self.models()?, path, language, &self.languages)?,
                ExtractionMethod::ImageOcr,
            ),
            DocumentKind::Unsupported(mime) => return Err(AgreewiseError::UnsupportedFormat(mime)),
        };

        Ok(ExtractionResult::succeeded(normalize_text(&text), method, mime_type))
    }

    fn extract_pdf(&self, path: &Path, pdf_bytes: &[u8], language: &str) -> Result<(String, ExtractionMethod)> {
        let backend = self.pdf_backend()?;

        match extract_pdf_text(backend, pdf_bytes, self.config.pdf.min_text_chars) {
            PdfTextOutcome::Extracted(text) => Ok((text, ExtractionMethod::PdfExtraction)),
            PdfTextOutcome::InsufficientText => {
                tracing::info!("No usable text layer in {}, falling back to OCR", path.display());
                let text = ocr_pdf(
                    backend,
                    self.models()?,
                    pdf_bytes,
                    language,
                    &self.languages,
                    self.config.pdf.ocr_dpi,
                )?;
                Ok((text, ExtractionMethod::PdfOcr))
            }
        }
    }

    fn pdf_backend(&self) -> Result<&dyn PdfBackend> {
        self.pdf_backend.as_deref().ok_or_else(|| {
            AgreewiseError::MissingDependency("PDF extraction requires the 'pdf' feature".to_string())
        })
    }

    fn models(&self) -> Result<&ModelCache> {
        self.models.as_deref().ok_or_else(|| {
            AgreewiseError::MissingDependency("OCR requires the 'ocr' feature or an injected model cache".to_string())
        })
    }
}

impl Default for DocumentProcessor {
    fn default() -> Self {
        Self::new(ExtractionConfig::default())
    }
}

impl std::fmt::Debug for DocumentProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentProcessor")
            .field("config", &self.config)
            .field("pdf_backend", &self.pdf_backend.is_some())
            .field("models", &self.models)
            .finish()
    }
}

#[cfg(feature = "pdf")]
fn default_pdf_backend() -> Option<Arc<dyn PdfBackend>> {
    Some(Arc::new(crate::pdf::PdfiumBackend::new()))
}

#[cfg(not(feature = "pdf"))]
fn default_pdf_backend() -> Option<Arc<dyn PdfBackend>> {
    None
}

#[cfg(feature = "ocr")]
fn default_models(config: &ExtractionConfig) -> Option<Arc<ModelCache>> {
    match &config.ocr.tessdata_path {
        Some(path) => Some(Arc::new(ModelCache::new(crate::ocr::TesseractFactory::new(Some(
            path.clone(),
        ))))),
        None => Some(crate::ocr::default_model_cache()),
    }
}

#[cfg(not(feature = "ocr"))]
fn default_models(_config: &ExtractionConfig) -> Option<Arc<ModelCache>> {
    None
}

/// Extract the text of one file with the default processor.
///
/// # Example
///
/// ```rust,no_run
/// use agreewise::process_document;
///
/// let result = process_document("lease.pdf", Some("en"));
/// if result.success {
///     println!("{} characters via {:?}", result.char_count, result.method);
/// } else {
///     eprintln!("{}", result.error.unwrap_or_default());
/// }
/// ```
pub fn process_document(path: impl AsRef<Path>, language_hint: Option<&str>) -> ExtractionResult {
    DocumentProcessor::default().process(path, language_hint)
}

#[cfg(feature = "tokio-runtime")]
impl DocumentProcessor {
    /// Run [`process`](Self::process) on the blocking thread pool.
    pub async fn process_async(
        &self,
        path: impl Into<std::path::PathBuf>,
        language_hint: Option<String>,
    ) -> ExtractionResult {
        let processor = self.clone();
        let path = path.into();

        tokio::task::spawn_blocking(move || processor.process(&path, language_hint.as_deref()))
            .await
            .unwrap_or_else(|e| ExtractionResult::failed(format!("Extraction task failed: {}", e)))
    }
}

/// Async counterpart of [`process_document`].
#[cfg(feature = "tokio-runtime")]
pub async fn process_document_async(
    path: impl Into<std::path::PathBuf>,
    language_hint: Option<String>,
) -> ExtractionResult {
    DocumentProcessor::default().process_async(path, language_hint).await
}
