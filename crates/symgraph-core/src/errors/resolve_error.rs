//! Reference resolution errors.

use super::error_code::{self, SymgraphErrorCode};

/// Default hint attached to a failed definition lookup.
pub const NOT_FOUND_GUIDANCE: &str =
    "check the spelling, or make sure the file declaring it is part of the analyzed file set";

/// Errors that can occur while resolving a name to its definition.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("Symbol '{symbol}' not found: {guidance}")]
    NotFound { symbol: String, guidance: String },
}

impl ResolveError {
    /// Not-found error carrying the default guidance text.
    pub fn not_found(symbol: impl Into<String>) -> Self {
        Self::NotFound {
            symbol: symbol.into(),
            guidance: NOT_FOUND_GUIDANCE.to_string(),
        }
    }

    /// The symbol name the lookup failed for.
    pub fn symbol(&self) -> &str {
        match self {
            Self::NotFound { symbol, .. } => symbol,
        }
    }
}

impl SymgraphErrorCode for ResolveError {
    fn error_code(&self) -> &'static str {
        error_code::NOT_FOUND
    }
}
