//! Top-level analysis error aggregating the subsystem errors.

use super::error_code::SymgraphErrorCode;
use super::{CallGraphError, ConfigError, DeadCodeError, ResolveError};

/// Errors surfaced at the reporting boundary.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("Call graph error: {0}")]
    CallGraph(#[from] CallGraphError),

    #[error("Dead code error: {0}")]
    DeadCode(#[from] DeadCodeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl AnalysisError {
    /// Process exit status for this error. Always non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            _ => 1,
        }
    }
}

impl SymgraphErrorCode for AnalysisError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Resolve(e) => e.error_code(),
            Self::CallGraph(e) => e.error_code(),
            Self::DeadCode(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
