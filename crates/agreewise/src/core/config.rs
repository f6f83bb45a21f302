//! Configuration loading and management.
//!
//! Configuration can be built programmatically, loaded from a TOML, YAML or JSON
//! file, or discovered as `agreewise.toml` in the working directory hierarchy.
//! Every field has a default, so an empty file is a valid configuration.

use crate::{AgreewiseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Name of the file looked up by [`ExtractionConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "agreewise.toml";

/// Main extraction configuration.
///
/// # Example
///
/// ```rust
/// use agreewise::core::config::ExtractionConfig;
///
/// let config = ExtractionConfig::default();
/// assert_eq!(config.pdf.min_text_chars, 50);
/// assert_eq!(config.default_language, "en");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Language hint used when the caller does not provide one
    #[serde(default = "default_language")]
    pub default_language: String,

    #[serde(default)]
    pub pdf: PdfConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// PDF text layer and rasterization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PdfConfig {
    /// Below this many characters (after trimming) the text layer is treated as absent
    #[serde(default = "default_min_text_chars")]
    pub min_text_chars: usize,

    /// Resolution used when rendering pages for OCR
    #[serde(default = "default_ocr_dpi")]
    pub ocr_dpi: u16,
}

/// OCR engine settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Extra or replacement entries for the language hint → model code table
    #[serde(default)]
    pub language_map: HashMap<String, String>,

    /// Model code used for hints missing from the table (None = "en")
    #[serde(default)]
    pub fallback_language: Option<String>,

    /// Directory holding Tesseract traineddata files (None = TESSDATA_PREFIX or system paths)
    #[serde(default)]
    pub tessdata_path: Option<String>,
}

/// Limits applied by upload handlers before files reach the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,

    /// Maximum accepted file size in bytes
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
}

/// Settings for preparing extracted text for contract analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Extracted text longer than this is truncated before analysis
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,
}

fn default_language() -> String {
    "en".to_string()
}
fn default_min_text_chars() -> usize {
    50
}
fn default_ocr_dpi() -> u16 {
    300
}
fn default_allowed_extensions() -> Vec<String> {
    ["pdf", "docx", "doc", "png", "jpg", "jpeg", "heic"]
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}
fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}
fn default_max_input_chars() -> usize {
    30_000
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            pdf: PdfConfig::default(),
            ocr: OcrConfig::default(),
            upload: UploadConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            min_text_chars: default_min_text_chars(),
            ocr_dpi: default_ocr_dpi(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
            max_file_size: default_max_file_size(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `AgreewiseError::Validation` if the file can't be read or is invalid TOML.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        toml::from_str(&content)
            .map_err(|e| AgreewiseError::validation(format!("Invalid TOML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_yaml_ng::from_str(&content)
            .map_err(|e| AgreewiseError::validation(format!("Invalid YAML in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = read_config(path.as_ref())?;

        serde_json::from_str(&content)
            .map_err(|e| AgreewiseError::validation(format!("Invalid JSON in {}: {}", path.as_ref().display(), e)))
    }

    /// Load configuration, picking the format from the file extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("toml") => Self::from_toml_file(path),
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(AgreewiseError::validation(format!(
                "Unsupported config file format: {} (expected .toml, .yaml, .yml or .json)",
                path.display()
            ))),
        }
    }

    /// Discover `agreewise.toml` in the current directory or any parent.
    ///
    /// # Returns
    ///
    /// - `Some(config)` if found
    /// - `None` if no config file found
    pub fn discover() -> Result<Option<Self>> {
        let mut current = std::env::current_dir().map_err(AgreewiseError::Io)?;

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.exists() {
                tracing::debug!("Using config file {}", candidate.display());
                return Ok(Some(Self::from_toml_file(candidate)?));
            }

            if let Some(parent) = current.parent() {
                current = parent.to_path_buf();
            } else {
                break;
            }
        }

        Ok(None)
    }

    /// The caller's language hint, or the configured default when none was given.
    pub fn language_or_default<'a>(&'a self, hint: Option<&'a str>) -> &'a str {
        match hint.map(str::trim) {
            Some(hint) if !hint.is_empty() => hint,
            _ => &self.default_language,
        }
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .map_err(|e| AgreewiseError::validation(format!("Failed to read config file {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = ExtractionConfig::default();
        assert_eq!(config.default_language, "en");
        assert_eq!(config.pdf.min_text_chars, 50);
        assert_eq!(config.pdf.ocr_dpi, 300);
        assert_eq!(config.upload.max_file_size, 10 * 1024 * 1024);
        assert_eq!(config.analysis.max_input_chars, 30_000);
        assert!(config.ocr.language_map.is_empty());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("agreewise.toml");
        fs::write(&config_path, "").unwrap();

        let config = ExtractionConfig::from_toml_file(&config_path).unwrap();
        assert_eq!(config.pdf.min_text_chars, 50);
        assert!(config.upload.allowed_extensions.contains(&"heic".to_string()));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("agreewise.toml");

        fs::write(
            &config_path,
            r#"
default_language = "es"

[pdf]
min_text_chars = 80
ocr_dpi = 200

[ocr]
fallback_language = "fr"
tessdata_path = "/opt/tessdata"

[ocr.language_map]
uk = "uk"
        "#,
        )
        .unwrap();

        let config = ExtractionConfig::from_toml_file(&config_path).unwrap();
        assert_eq!(config.default_language, "es");
        assert_eq!(config.pdf.min_text_chars, 80);
        assert_eq!(config.pdf.ocr_dpi, 200);
        assert_eq!(config.ocr.fallback_language.as_deref(), Some("fr"));
        assert_eq!(config.ocr.tessdata_path.as_deref(), Some("/opt/tessdata"));
        assert_eq!(config.ocr.language_map.get("uk").map(String::as_str), Some("uk"));
    }

    #[test]
    fn test_from_file_dispatches_on_extension() {
        let dir = tempdir().unwrap();

        let yaml_path = dir.path().join("config.yaml");
        fs::write(&yaml_path, "pdf:\n  min_text_chars: 10\n").unwrap();
        assert_eq!(ExtractionConfig::from_file(&yaml_path).unwrap().pdf.min_text_chars, 10);

        let json_path = dir.path().join("config.json");
        fs::write(&json_path, r#"{"analysis": {"max_input_chars": 1000}}"#).unwrap();
        assert_eq!(
            ExtractionConfig::from_file(&json_path).unwrap().analysis.max_input_chars,
            1000
        );

        let ini_path = dir.path().join("config.ini");
        fs::write(&ini_path, "").unwrap();
        assert!(matches!(
            ExtractionConfig::from_file(&ini_path),
            Err(AgreewiseError::Validation { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_is_validation_error() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("agreewise.toml");
        fs::write(&config_path, "[pdf\nmin_text_chars = ").unwrap();

        let err = ExtractionConfig::from_toml_file(&config_path).unwrap_err();
        assert!(matches!(err, AgreewiseError::Validation { .. }));
        assert!(err.to_string().contains("Invalid TOML"));
    }

    #[test]
    fn test_missing_file_is_validation_error() {
        let err = ExtractionConfig::from_toml_file("/nonexistent/agreewise.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_language_or_default() {
        let config = ExtractionConfig::default();
        assert_eq!(config.language_or_default(Some("ko")), "ko");
        assert_eq!(config.language_or_default(Some("  ")), "en");
        assert_eq!(config.language_or_default(None), "en");
    }
}
