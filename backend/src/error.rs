//! Error types for corpus statistics extraction.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by the parsing side of the backend.
pub type Result<T> = std::result::Result<T, HumgError>;

#[derive(Debug, Error)]
pub enum HumgError {
    /// The input is not well-formed XML. Fatal for the file it names.
    #[error("Malformed XML document {path:?}: {reason}")]
    MalformedDocument {
        path: PathBuf,
        reason: String,
    },

    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No input files to process")]
    NoInputFiles,
}

impl HumgError {
    pub fn malformed(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        HumgError::MalformedDocument {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The file an error is about, when there is one.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            HumgError::MalformedDocument { path, .. } => Some(path),
            HumgError::Io { path, .. } => Some(path),
            HumgError::NoInputFiles => None,
        }
    }
}
