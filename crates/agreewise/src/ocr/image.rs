use super::cache::ModelCache;
use super::language::LanguageTable;
use crate::Result;
use std::path::Path;

/// Recognize the text of a raster image.
///
/// The language hint selects the model through `languages`; the model is fetched
/// from (or loaded into) `models`. Recognized paragraph blocks are joined with a
/// blank line. An image with no recognizable text yields an empty string.
///
/// # Errors
///
/// Returns `AgreewiseError::Ocr` if the model cannot be loaded or recognition fails.
pub fn ocr_image(
    models: &ModelCache,
    image_path: &Path,
    language_hint: &str,
    languages: &LanguageTable,
) -> Result<String> {
    let model_languages = languages.model_languages(language_hint);

    let blocks = models.with_recognizer(&model_languages, |recognizer| recognizer.recognize(image_path))?;

    tracing::debug!(
        "Recognized {} text blocks in {} (languages {:?})",
        blocks.len(),
        image_path.display(),
        model_languages
    );

    Ok(blocks.join("\n\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::{OcrError, RecognizerFactory, TextRecognizer};
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct Scripted {
        languages: Vec<String>,
        seen: Arc<Mutex<Vec<(Vec<String>, PathBuf)>>>,
    }

    impl TextRecognizer for Scripted {
        fn languages(&self) -> &[String] {
            &self.languages
        }

        fn recognize(&mut self, image_path: &Path) -> std::result::Result<Vec<String>, OcrError> {
            self.seen
                .lock()
                .unwrap()
                .push((self.languages.clone(), image_path.to_path_buf()));
            if image_path.ends_with("unreadable.png") {
                return Err(OcrError::ImageProcessingFailed("cannot decode".to_string()));
            }
            Ok(vec!["LEASE".to_string(), "Rent: $1200".to_string()])
        }
    }

    #[derive(Default, Clone)]
    struct ScriptedFactory {
        seen: Arc<Mutex<Vec<(Vec<String>, PathBuf)>>>,
    }

    impl RecognizerFactory for ScriptedFactory {
        fn create(&self, languages: &[String]) -> std::result::Result<Box<dyn TextRecognizer>, OcrError> {
            Ok(Box::new(Scripted {
                languages: languages.to_vec(),
                seen: Arc::clone(&self.seen),
            }))
        }
    }

    #[test]
    fn test_blocks_joined_with_blank_line() {
        let factory = ScriptedFactory::default();
        let cache = ModelCache::new(factory.clone());

        let text = ocr_image(&cache, Path::new("scan.png"), "en", &LanguageTable::default()).unwrap();
        assert_eq!(text, "LEASE\n\nRent: $1200");
    }

    #[test]
    fn test_hint_selects_model() {
        let factory = ScriptedFactory::default();
        let cache = ModelCache::new(factory.clone());

        ocr_image(&cache, Path::new("scan.png"), "zh", &LanguageTable::default()).unwrap();
        ocr_image(&cache, Path::new("scan.png"), "xx", &LanguageTable::default()).unwrap();

        let seen = factory.seen.lock().unwrap();
        assert_eq!(seen[0].0, vec!["ch_sim".to_string()]);
        assert_eq!(seen[1].0, vec!["en".to_string()]);
    }

    #[test]
    fn test_recognition_failure_is_ocr_error() {
        let cache = ModelCache::new(ScriptedFactory::default());
        let err = ocr_image(&cache, Path::new("unreadable.png"), "en", &LanguageTable::default()).unwrap_err();
        assert!(matches!(err, crate::AgreewiseError::Ocr { .. }));
    }
}
