//! Loading of extracted header documents.

use std::path::{Path, PathBuf};

use edf_model::{ExtractedHeader, ModelError};
use edf_report::normalize_separators;
use tracing::{debug, error};

/// A header document that could not be loaded.
#[derive(Debug)]
pub struct InputFailure {
    pub path: PathBuf,
    pub error: ModelError,
}

/// Headers loaded from every readable document, plus the documents skipped.
#[derive(Debug, Default)]
pub struct LoadedInputs {
    pub headers: Vec<ExtractedHeader>,
    pub failures: Vec<InputFailure>,
}

/// Load every document in `paths`, in order.
///
/// Unreadable or malformed documents are logged and skipped. Source
/// identifiers are normalized to the platform path separator.
pub fn load_headers(paths: &[PathBuf]) -> LoadedInputs {
    let mut loaded = LoadedInputs::default();
    for path in paths {
        match load_document(path) {
            Ok(headers) => {
                debug!(path = %path.display(), headers = headers.len(), "header document loaded");
                loaded.headers.extend(headers);
            }
            Err(error) => {
                error!(path = %path.display(), %error, "header document skipped");
                loaded.failures.push(InputFailure {
                    path: path.clone(),
                    error,
                });
            }
        }
    }
    loaded
}

fn load_document(path: &Path) -> edf_model::Result<Vec<ExtractedHeader>> {
    let mut headers = ExtractedHeader::load_json(path)?;
    for header in &mut headers {
        header.source = normalize_separators(&header.source);
    }
    Ok(headers)
}
