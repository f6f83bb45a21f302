//! Shared fixtures for integration tests.
//!
//! Real engines (Pdfium, Tesseract) are replaced through the crate's trait seams:
//!
//! - [`FakePdf`] serves a fixed list of page text layers and renders page N as a
//!   small image whose red channel is N.
//! - [`ScriptedOcr`] reads that red channel back and returns the scripted text
//!   for that shade, recording every image path it was shown.

#![allow(dead_code)]

use agreewise::ocr::{ModelCache, OcrError, RecognizerFactory, TextRecognizer, paragraph_blocks};
use agreewise::pdf::{PdfBackend, PdfError};
use image::{DynamicImage, Rgb, RgbImage};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Leading bytes that content detection recognizes as a PDF.
pub const PDF_HEADER: &[u8] = b"%PDF-1.7\n%\xE2\xE3\xCF\xD3\n";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A PDF engine with scripted pages.
#[derive(Default)]
pub struct FakePdf {
    text_layers: Vec<String>,
    renders: AtomicUsize,
}

impl FakePdf {
    pub fn with_text_layers(text_layers: &[&str]) -> Self {
        Self {
            text_layers: text_layers.iter().map(|text| text.to_string()).collect(),
            renders: AtomicUsize::new(0),
        }
    }

    /// A scanned document: pages without any text layer.
    pub fn scanned(pages: usize) -> Self {
        Self::with_text_layers(&vec![""; pages])
    }

    pub fn render_count(&self) -> usize {
        self.renders.load(Ordering::SeqCst)
    }
}

impl PdfBackend for FakePdf {
    fn page_count(&self, _pdf_bytes: &[u8]) -> Result<usize, PdfError> {
        Ok(self.text_layers.len())
    }

    fn page_texts(&self, _pdf_bytes: &[u8]) -> Result<Vec<Result<String, PdfError>>, PdfError> {
        Ok(self.text_layers.iter().cloned().map(Ok).collect())
    }

    fn render_page(&self, _pdf_bytes: &[u8], page_index: usize, _dpi: u16) -> Result<DynamicImage, PdfError> {
        if page_index >= self.text_layers.len() {
            return Err(PdfError::PageNotFound(page_index));
        }
        self.renders.fetch_add(1, Ordering::SeqCst);
        Ok(DynamicImage::ImageRgb8(shaded(page_index as u8)))
    }
}

fn shaded(shade: u8) -> RgbImage {
    RgbImage::from_pixel(4, 4, Rgb([shade, 0, 0]))
}

/// Write a PNG that [`ScriptedOcr`] reads as `texts[shade]`.
pub fn write_shaded_png(path: &Path, shade: u8) {
    shaded(shade).save_with_format(path, image::ImageFormat::Png).unwrap();
}

#[derive(Default)]
struct OcrState {
    texts: Vec<String>,
    created: AtomicUsize,
    seen: Mutex<Vec<(Vec<String>, PathBuf)>>,
}

/// Recognizer factory returning scripted text per image shade.
#[derive(Clone, Default)]
pub struct ScriptedOcr {
    state: Arc<OcrState>,
}

impl ScriptedOcr {
    pub fn new(texts: &[&str]) -> Self {
        Self {
            state: Arc::new(OcrState {
                texts: texts.iter().map(|text| text.to_string()).collect(),
                ..OcrState::default()
            }),
        }
    }

    pub fn model_cache(&self) -> Arc<ModelCache> {
        Arc::new(ModelCache::new(self.clone()))
    }

    /// How many models were loaded.
    pub fn models_created(&self) -> usize {
        self.state.created.load(Ordering::SeqCst)
    }

    /// Every image path passed to recognition, in order.
    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.state.seen.lock().unwrap().iter().map(|(_, path)| path.clone()).collect()
    }

    /// Model languages used for every recognition, in order.
    pub fn seen_languages(&self) -> Vec<Vec<String>> {
        self.state.seen.lock().unwrap().iter().map(|(langs, _)| langs.clone()).collect()
    }
}

impl RecognizerFactory for ScriptedOcr {
    fn create(&self, languages: &[String]) -> Result<Box<dyn TextRecognizer>, OcrError> {
        self.state.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(ScriptedRecognizer {
            languages: languages.to_vec(),
            state: Arc::clone(&self.state),
        }))
    }
}

struct ScriptedRecognizer {
    languages: Vec<String>,
    state: Arc<OcrState>,
}

impl TextRecognizer for ScriptedRecognizer {
    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn recognize(&mut self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        self.state
            .seen
            .lock()
            .unwrap()
            .push((self.languages.clone(), image_path.to_path_buf()));

        let image = image::ImageReader::open(image_path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| OcrError::ImageProcessingFailed(e.to_string()))?
            .decode()
            .map_err(|e| OcrError::ImageProcessingFailed(e.to_string()))?;
        let shade = image.to_rgb8().get_pixel(0, 0)[0] as usize;
        let text = self.state.texts.get(shade).map(String::as_str).unwrap_or_default();
        Ok(paragraph_blocks(text))
    }
}

/// Build a minimal DOCX package with body paragraphs followed by one table.
pub fn build_docx(paragraphs: &[&str], table_rows: &[&[&str]]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;

    let mut body = String::new();
    for text in paragraphs {
        body.push_str(&format!(
            r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
            text
        ));
    }
    if !table_rows.is_empty() {
        body.push_str("<w:tbl>");
        for row in table_rows {
            body.push_str("<w:tr>");
            for cell in row.iter() {
                body.push_str(&format!(
                    r#"<w:tc><w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p></w:tc>"#,
                    cell
                ));
            }
            body.push_str("</w:tr>");
        }
        body.push_str("</w:tbl>");
    }

    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body
    );

    let content_types = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

    let rels = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
</Relationships>"#;

    let mut buffer = std::io::Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buffer);
        writer.start_file("[Content_Types].xml", SimpleFileOptions::default()).unwrap();
        writer.write_all(content_types.as_bytes()).unwrap();
        writer.start_file("_rels/.rels", SimpleFileOptions::default()).unwrap();
        writer.write_all(rels.as_bytes()).unwrap();
        writer.start_file("word/document.xml", SimpleFileOptions::default()).unwrap();
        writer.write_all(document.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buffer.into_inner()
}

/// Count files left in a directory.
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}
