//! Source locations shared by the resolver, the graph and the reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A line/column position inside a file. Both are 1-based; `0` means unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// A position qualified by its file path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<String>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Location used when a position could not be computed.
    pub fn zero(file: impl Into<String>) -> Self {
        Self::new(file, 0, 0)
    }

    pub fn at(file: impl Into<String>, position: Position) -> Self {
        Self::new(file, position.line, position.column)
    }

    pub fn is_zero(&self) -> bool {
        self.line == 0 && self.column == 0
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}
