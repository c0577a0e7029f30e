//! Call graph and path search errors.

use super::error_code::{self, SymgraphErrorCode};

/// Errors that can occur during path search over the call graph.
#[derive(Debug, thiserror::Error)]
pub enum CallGraphError {
    #[error("Symbol '{symbol}' not found in call graph")]
    SymbolNotInGraph { symbol: String },

    #[error("Malformed trace query '{query}': {message}")]
    MalformedQuery { query: String, message: String },
}

impl SymgraphErrorCode for CallGraphError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SymbolNotInGraph { .. } => error_code::NOT_FOUND,
            Self::MalformedQuery { .. } => error_code::MALFORMED_QUERY,
        }
    }
}
