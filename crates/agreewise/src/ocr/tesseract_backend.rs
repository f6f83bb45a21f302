//! Tesseract-backed recognizer.

use super::error::OcrError;
use super::recognizer::{RecognizerFactory, TextRecognizer, paragraph_blocks};
use kreuzberg_tesseract::{TessPageSegMode, TesseractAPI};
use std::env;
use std::path::Path;

/// Automatic page segmentation without orientation detection.
const AUTO_PAGE_SEGMENTATION: i32 = 3;

const TESSDATA_FALLBACK_PATHS: &[&str] = &[
    "/opt/homebrew/share/tessdata",
    "/opt/homebrew/opt/tesseract/share/tessdata",
    "/usr/local/opt/tesseract/share/tessdata",
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    r#"C:\Program Files\Tesseract-OCR\tessdata"#,
    r#"C:\ProgramData\Tesseract-OCR\tessdata"#,
];

/// Tesseract traineddata name for a model code.
pub fn traineddata_name(model_code: &str) -> Option<&'static str> {
    let name = match model_code {
        "en" => "eng",
        "es" => "spa",
        "fr" => "fra",
        "de" => "deu",
        "pt" => "por",
        "ch_sim" => "chi_sim",
        "ch_tra" => "chi_tra",
        "ja" => "jpn",
        "ko" => "kor",
        "ar" => "ara",
        "hi" => "hin",
        "ru" => "rus",
        "it" => "ita",
        "tr" => "tur",
        "pl" => "pol",
        "nl" => "nld",
        "uk" => "ukr",
        _ => return None,
    };
    Some(name)
}

/// Tesseract language string (`eng+kor`) for a set of model codes.
pub fn tesseract_languages(model_codes: &[String]) -> Result<String, OcrError> {
    if model_codes.is_empty() {
        return Err(OcrError::InvalidLanguageCode(
            "Language cannot be empty. Please specify a valid language code (e.g., 'en')".to_string(),
        ));
    }

    model_codes
        .iter()
        .map(|code| {
            traineddata_name(code)
                .map(str::to_string)
                .ok_or_else(|| OcrError::InvalidLanguageCode(code.clone()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|names| names.join("+"))
}

fn resolve_tessdata(configured: Option<&str>) -> String {
    configured
        .map(str::to_string)
        .or_else(|| env::var("TESSDATA_PREFIX").ok())
        .or_else(|| {
            TESSDATA_FALLBACK_PATHS
                .iter()
                .find(|p| Path::new(p).exists())
                .map(|p| (*p).to_string())
        })
        .unwrap_or_default()
}

/// Creates [`TesseractRecognizer`]s.
#[derive(Debug, Clone, Default)]
pub struct TesseractFactory {
    tessdata_path: Option<String>,
}

impl TesseractFactory {
    /// `tessdata_path` of None resolves `TESSDATA_PREFIX`, then well-known install paths.
    pub fn new(tessdata_path: Option<String>) -> Self {
        Self { tessdata_path }
    }
}

impl RecognizerFactory for TesseractFactory {
    fn create(&self, languages: &[String]) -> Result<Box<dyn TextRecognizer>, OcrError> {
        let language = tesseract_languages(languages)?;
        let tessdata_path = resolve_tessdata(self.tessdata_path.as_deref());

        // tesseract can crash instead of erroring when a traineddata file is missing
        if !tessdata_path.is_empty() {
            for lang in language.split('+') {
                let traineddata_path = Path::new(&tessdata_path).join(format!("{}.traineddata", lang));
                if !traineddata_path.exists() {
                    return Err(OcrError::TesseractInitializationFailed(format!(
                        "Language '{}' not found. Traineddata file does not exist: {}",
                        lang,
                        traineddata_path.display()
                    )));
                }
            }
        }

        let api = TesseractAPI::new();
        api.init(&tessdata_path, &language).map_err(|e| {
            OcrError::TesseractInitializationFailed(format!("Failed to initialize language '{}': {}", language, e))
        })?;

        api.set_page_seg_mode(TessPageSegMode::from_int(AUTO_PAGE_SEGMENTATION))
            .map_err(|e| OcrError::InvalidConfiguration(format!("Failed to set PSM mode: {}", e)))?;

        tracing::info!(
            "Loaded Tesseract {} with languages '{}' (tessdata '{}')",
            TesseractAPI::version(),
            language,
            tessdata_path
        );

        Ok(Box::new(TesseractRecognizer {
            api,
            languages: languages.to_vec(),
        }))
    }
}

/// An initialized Tesseract engine.
pub struct TesseractRecognizer {
    api: TesseractAPI,
    languages: Vec<String>,
}

impl TextRecognizer for TesseractRecognizer {
    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn recognize(&mut self, image_path: &Path) -> Result<Vec<String>, OcrError> {
        // uploads keep temporary names, so the format comes from the content
        let img = image::ImageReader::open(image_path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(|e| {
                OcrError::ImageProcessingFailed(format!("Failed to open image {}: {}", image_path.display(), e))
            })?
            .decode()
            .map_err(|e| {
                OcrError::ImageProcessingFailed(format!("Failed to decode image {}: {}", image_path.display(), e))
            })?;

        let rgb_image = img.to_rgb8();
        let (width, height) = rgb_image.dimensions();
        let bytes_per_pixel = 3;
        let bytes_per_line = width * bytes_per_pixel;

        self.api
            .set_image(
                rgb_image.as_raw(),
                width as i32,
                height as i32,
                bytes_per_pixel as i32,
                bytes_per_line as i32,
            )
            .map_err(|e| OcrError::ProcessingFailed(format!("Failed to set image: {}", e)))?;

        self.api
            .recognize()
            .map_err(|e| OcrError::ProcessingFailed(format!("Failed to recognize text: {}", e)))?;

        let text = self
            .api
            .get_utf8_text()
            .map_err(|e| OcrError::ProcessingFailed(format!("Failed to extract text: {}", e)))?;

        Ok(paragraph_blocks(&text))
    }
}
