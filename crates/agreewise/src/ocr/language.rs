//! Language hint to recognition model mapping.

use crate::core::config::OcrConfig;
use std::collections::HashMap;

/// Built-in hint → model code entries.
pub const DEFAULT_LANGUAGE_MAP: &[(&str, &str)] = &[
    ("en", "en"),
    ("es", "es"),
    ("fr", "fr"),
    ("de", "de"),
    ("pt", "pt"),
    ("zh", "ch_sim"),
    ("ja", "ja"),
    ("ko", "ko"),
    ("ar", "ar"),
    ("hi", "hi"),
    ("ru", "ru"),
    ("it", "it"),
    ("tr", "tr"),
    ("pl", "pl"),
    ("nl", "nl"),
];

/// Model code used for hints missing from the table.
pub const DEFAULT_FALLBACK_MODEL: &str = "en";

/// Maps two-letter language hints to recognition model codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageTable {
    entries: HashMap<String, String>,
    fallback: String,
}

impl Default for LanguageTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_LANGUAGE_MAP
                .iter()
                .map(|(hint, model)| (hint.to_string(), model.to_string()))
                .collect(),
            fallback: DEFAULT_FALLBACK_MODEL.to_string(),
        }
    }
}

impl LanguageTable {
    /// Default table with the configured overrides merged on top.
    pub fn from_config(config: &OcrConfig) -> Self {
        let mut table = Self::default();
        for (hint, model) in &config.language_map {
            table.entries.insert(hint.to_ascii_lowercase(), model.clone());
        }
        if let Some(fallback) = &config.fallback_language {
            table.fallback = fallback.clone();
        }
        table
    }

    /// Model code for a hint; unknown hints resolve to the fallback.
    pub fn model_code(&self, hint: &str) -> &str {
        let key = hint.trim().to_ascii_lowercase();
        match self.entries.get(&key) {
            Some(model) => model,
            None => {
                tracing::debug!("No OCR model for language '{}', using '{}'", hint, self.fallback);
                &self.fallback
            }
        }
    }

    /// Language set handed to the model cache for a hint.
    pub fn model_languages(&self, hint: &str) -> Vec<String> {
        vec![self.model_code(hint).to_string()]
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    pub fn supports(&self, hint: &str) -> bool {
        self.entries.contains_key(&hint.trim().to_ascii_lowercase())
    }
}
