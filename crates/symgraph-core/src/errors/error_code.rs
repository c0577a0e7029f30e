//! SymgraphErrorCode trait for boundary conversion.

/// Trait for mapping symgraph errors to stable error code strings.
/// Every error enum implements this so the reporting layer can print a
/// structured code alongside the message.
pub trait SymgraphErrorCode {
    /// Returns the error code string (e.g., "NOT_FOUND").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the reporting boundary.
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const FILE_NOT_FOUND: &str = "FILE_NOT_FOUND";
pub const MALFORMED_QUERY: &str = "MALFORMED_QUERY";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
