//! File handling for uploaded documents.
//!
//! [`SourceFile`] ties an uploaded file's lifetime to a Rust value: a temporary
//! upload is removed from disk when the value is dropped, on every exit path.

use crate::core::config::UploadConfig;
use crate::{AgreewiseError, Result};
use std::path::{Path, PathBuf};

/// Read a whole document into memory.
///
/// Every pipeline branch works from these bytes, so a document is read from
/// disk once per run. A missing or unreadable file is `AgreewiseError::Io`,
/// unchanged.
pub fn read_file_sync(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

/// Check an upload against the allowed extensions and size cap.
///
/// This is the gate an upload handler applies before handing the file to the
/// pipeline; the pipeline itself only looks at file content.
pub fn validate_upload(filename: &str, size_bytes: u64, limits: &UploadConfig) -> Result<()> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .ok_or_else(|| AgreewiseError::validation(format!("File has no extension: {}", filename)))?;

    if !limits
        .allowed_extensions
        .iter()
        .any(|allowed| allowed.eq_ignore_ascii_case(&extension))
    {
        return Err(AgreewiseError::validation(format!(
            "File type .{} is not allowed (allowed: {})",
            extension,
            limits.allowed_extensions.join(", ")
        )));
    }

    if size_bytes > limits.max_file_size {
        return Err(AgreewiseError::validation(format!(
            "File {} is {} bytes, larger than the {} byte limit",
            filename, size_bytes, limits.max_file_size
        )));
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cleanup {
    Delete,
    Keep,
}

/// An input document on disk.
///
/// Temporary source files are deleted when dropped; persistent ones are left alone.
#[derive(Debug)]
pub struct SourceFile {
    path: PathBuf,
    filename: String,
    cleanup: Cleanup,
}

impl SourceFile {
    /// A file owned by the pipeline run, removed from disk on drop.
    pub fn temporary(path: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            filename: filename.into(),
            cleanup: Cleanup::Delete,
        }
    }

    /// A file owned by someone else (e.g. a CLI argument); never deleted.
    pub fn persistent(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            path,
            filename,
            cleanup: Cleanup::Keep,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name shown to users, usually the original upload name.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn is_temporary(&self) -> bool {
        self.cleanup == Cleanup::Delete
    }
}

impl Drop for SourceFile {
    fn drop(&mut self) {
        if self.cleanup != Cleanup::Delete {
            return;
        }

        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!("Removed temporary upload {}", self.path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove temporary upload {}: {}", self.path.display(), e),
        }
    }
}
