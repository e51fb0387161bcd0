//! Source location tracking

use std::fmt;

use serde::Serialize;

/// Where a token or declaration sits in a schema file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// File the token was read from
    pub file: String,
    /// One-based line number
    pub line: usize,
    /// Zero-based column, counted from the start of the line
    pub column: usize,
}

impl Location {
    /// Create a new location
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }

    /// Create a dummy location (for testing)
    pub fn dummy() -> Self {
        Self::new("<none>", 1, 0)
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::dummy()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{},{}", self.file, self.line, self.column)
    }
}
