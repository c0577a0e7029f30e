//! Dead symbol detection errors.

use super::error_code::{self, SymgraphErrorCode};
use super::ResolveError;

/// Errors that can occur while checking a file for unreferenced symbols.
#[derive(Debug, thiserror::Error)]
pub enum DeadCodeError {
    #[error("File not found in source model: {path}")]
    FileNotFound { path: String },

    #[error(transparent)]
    Resolve(#[from] ResolveError),
}

impl SymgraphErrorCode for DeadCodeError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::FileNotFound { .. } => error_code::FILE_NOT_FOUND,
            Self::Resolve(e) => e.error_code(),
        }
    }
}
