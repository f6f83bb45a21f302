use super::error::PdfError;
use once_cell::sync::Lazy;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use std::sync::Mutex;

/// Cached outcome of the first Pdfium binding attempt.
///
/// Stores the directory the library was found in (None = system library) so
/// later calls bind straight to it, or the error so they fail fast.
enum InitializationState {
    Uninitialized,
    Initialized { lib_dir: Option<PathBuf> },
    Failed(String),
}

static PDFIUM_STATE: Lazy<Mutex<InitializationState>> = Lazy::new(|| Mutex::new(InitializationState::Uninitialized));

/// Directory checked for a Pdfium shared library before falling back to the system one.
///
/// `PDFIUM_LIB_DIR` overrides the default of the working directory.
fn local_library_dir() -> PathBuf {
    std::env::var_os("PDFIUM_LIB_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./"))
}

fn bind_pdfium_impl() -> Result<(Option<PathBuf>, Box<dyn PdfiumLibraryBindings>), String> {
    let lib_dir = local_library_dir();

    match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&lib_dir)) {
        Ok(bindings) => Ok((Some(lib_dir), bindings)),
        Err(local_err) => {
            tracing::debug!(
                "No Pdfium library in {} ({}), trying system library",
                lib_dir.display(),
                local_err
            );
            let bindings =
                Pdfium::bind_to_system_library().map_err(|e| format!("Failed to initialize Pdfium: {}", e))?;
            Ok((None, bindings))
        }
    }
}

/// Get Pdfium bindings with lazy initialization.
///
/// The first call locates the library; later calls create fresh bindings from
/// the cached location, or return the cached failure.
pub(crate) fn bind_pdfium(
    map_err: fn(String) -> PdfError,
    context: &'static str,
) -> Result<Box<dyn PdfiumLibraryBindings>, PdfError> {
    let mut state = PDFIUM_STATE
        .lock()
        .map_err(|e| map_err(format!("Failed to acquire lock on Pdfium state ({}): {}", context, e)))?;

    if let InitializationState::Uninitialized = &*state {
        match bind_pdfium_impl() {
            Ok((lib_dir, bindings)) => {
                *state = InitializationState::Initialized { lib_dir };
                return Ok(bindings);
            }
            Err(err) => {
                *state = InitializationState::Failed(err.clone());
                return Err(map_err(format!("Pdfium initialization failed ({}): {}", context, err)));
            }
        }
    }

    match &*state {
        InitializationState::Initialized { lib_dir: Some(lib_dir) } => {
            Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_dir))
                .map_err(|e| map_err(format!("Failed to create Pdfium bindings ({}): {}", context, e)))
        }
        InitializationState::Initialized { lib_dir: None } => Pdfium::bind_to_system_library()
            .map_err(|e| map_err(format!("Failed to create Pdfium bindings ({}): {}", context, e))),
        InitializationState::Failed(err) => Err(map_err(format!(
            "Pdfium initialization previously failed ({}): {}",
            context, err
        ))),
        InitializationState::Uninitialized => Err(map_err(format!(
            "Internal error: Pdfium state not initialized ({})",
            context
        ))),
    }
}
