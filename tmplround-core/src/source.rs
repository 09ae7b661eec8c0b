// Call-site positions for compile-time diagnostics

use std::fmt;

// RUST CONCEPT: Source position for rich error messages
// The host compiler records where each function call appears in the template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourcePos {
    pub line: usize,
    pub column: usize,
    pub offset: usize, // Byte offset from start of template source
}

impl SourcePos {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
