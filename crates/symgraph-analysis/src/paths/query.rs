//! `from -> to` trace arguments.

use symgraph_core::errors::CallGraphError;

/// Separators accepted between the two symbol keys.
const SEPARATORS: &[&str] = &["->", "=>"];

/// A parsed trace request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceQuery {
    pub from: String,
    pub to: String,
}

impl TraceQuery {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Parse `A->B` or `A=>B`. Whitespace around either key is ignored.
    pub fn parse(query: &str) -> Result<Self, CallGraphError> {
        let malformed = |message: &str| CallGraphError::MalformedQuery {
            query: query.to_string(),
            message: message.to_string(),
        };

        let (from, to) = SEPARATORS
            .iter()
            .find_map(|sep| query.split_once(sep))
            .ok_or_else(|| malformed("expected '<from> -> <to>'"))?;
        let (from, to) = (from.trim(), to.trim());

        if from.is_empty() || to.is_empty() {
            return Err(malformed("both symbol keys must be non-empty"));
        }
        if SEPARATORS.iter().any(|sep| to.contains(sep)) {
            return Err(malformed("expected exactly two symbol keys"));
        }
        Ok(Self::new(from, to))
    }
}
