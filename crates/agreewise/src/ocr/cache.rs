//! Single-slot cache for the loaded recognition model.
//!
//! Loading a model takes seconds, so the last one is kept and reused for as long
//! as requests ask for the same language set. A request for a different set
//! replaces it. The slot mutex serializes the check-and-swap and also keeps two
//! threads from driving the same engine at once.

use super::error::OcrError;
use super::recognizer::{RecognizerFactory, TextRecognizer};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

struct CachedModel {
    languages: Vec<String>,
    recognizer: Box<dyn TextRecognizer>,
}

pub struct ModelCache {
    factory: Box<dyn RecognizerFactory>,
    slot: Mutex<Option<CachedModel>>,
}

impl ModelCache {
    pub fn new(factory: impl RecognizerFactory + 'static) -> Self {
        Self {
            factory: Box::new(factory),
            slot: Mutex::new(None),
        }
    }

    /// Return the cached recognizer for `languages`, loading a new one if the
    /// cache is empty or holds a different language set.
    ///
    /// The returned guard keeps the cache locked until it is dropped.
    pub fn get_or_create(&self, languages: &[String]) -> Result<MappedMutexGuard<'_, dyn TextRecognizer>, OcrError> {
        let mut slot = self.slot.lock();

        let reusable = slot.as_ref().is_some_and(|cached| cached.languages == languages);
        if !reusable {
            tracing::debug!("Loading OCR model for languages {:?}", languages);
            let recognizer = self.factory.create(languages)?;
            *slot = Some(CachedModel {
                languages: languages.to_vec(),
                recognizer,
            });
        }

        MutexGuard::try_map(slot, |slot| slot.as_mut().map(|cached| &mut *cached.recognizer))
            .map_err(|_| OcrError::ProcessingFailed("OCR model cache is empty".to_string()))
    }

    /// Run `f` with the recognizer for `languages`.
    pub fn with_recognizer<T>(
        &self,
        languages: &[String],
        f: impl FnOnce(&mut dyn TextRecognizer) -> Result<T, OcrError>,
    ) -> Result<T, OcrError> {
        let mut recognizer = self.get_or_create(languages)?;
        f(&mut *recognizer)
    }

    /// Language set of the currently loaded model, if any.
    pub fn cached_languages(&self) -> Option<Vec<String>> {
        self.slot.lock().as_ref().map(|cached| cached.languages.clone())
    }

    /// Drop the loaded model.
    pub fn clear(&self) {
        *self.slot.lock() = None;
    }
}

impl std::fmt::Debug for ModelCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("cached_languages", &self.cached_languages())
            .finish()
    }
}
