//! Error handling for symgraph.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod analysis_error;
pub mod call_graph_error;
pub mod config_error;
pub mod dead_code_error;
pub mod error_code;
pub mod resolve_error;

pub use analysis_error::AnalysisError;
pub use call_graph_error::CallGraphError;
pub use config_error::ConfigError;
pub use dead_code_error::DeadCodeError;
pub use error_code::SymgraphErrorCode;
pub use resolve_error::ResolveError;
