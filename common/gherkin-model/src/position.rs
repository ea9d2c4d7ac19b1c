//! Source positions

use std::fmt;

/// A location in a source document. Both line and column are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    pub line: u32,
    pub column: u32,
}

impl TextPosition {
    /// First character of a document
    pub const START: TextPosition = TextPosition { line: 1, column: 1 };

    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position shifted right by `offset` columns on the same line
    pub fn shifted(self, offset: u32) -> Self {
        Self {
            line: self.line,
            column: self.column + offset,
        }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
