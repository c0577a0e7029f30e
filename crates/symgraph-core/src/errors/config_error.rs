//! Configuration errors.

use super::error_code::{self, SymgraphErrorCode};

/// Failures while loading or checking a `symgraph.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Config parse error in {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("Invalid skip pattern '{pattern}': {message}")]
    InvalidSkipPattern { pattern: String, message: String },

    #[error("Invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}

impl SymgraphErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        error_code::CONFIG_ERROR
    }
}
