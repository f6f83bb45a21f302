//! The recognition engine seam.

use super::error::OcrError;
use std::path::Path;

/// A loaded recognition model.
pub trait TextRecognizer: Send {
    /// Model codes this recognizer was created for.
    fn languages(&self) -> &[String];

    /// Recognize text in an image file, returned as paragraph blocks in reading order.
    fn recognize(&mut self, image_path: &Path) -> Result<Vec<String>, OcrError>;
}

/// Loads recognition models. Loading is expensive; see [`super::ModelCache`].
pub trait RecognizerFactory: Send + Sync {
    fn create(&self, languages: &[String]) -> Result<Box<dyn TextRecognizer>, OcrError>;
}

/// Group raw engine output into paragraph blocks.
///
/// Consecutive non-blank lines form one block, their trimmed lines joined by a
/// single space. Blank lines separate blocks.
pub fn paragraph_blocks(raw: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join(" "));
                current.clear();
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current.join(" "));
    }

    blocks
}
