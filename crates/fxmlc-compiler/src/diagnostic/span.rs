//! Source location tracking.

use std::fmt;
use std::path::PathBuf;

/// A span in the source code.
///
/// Lines and columns are zero-based, matching tree-sitter positions.
/// `Display` renders them one-based for humans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Span {
    pub file: PathBuf,
    pub start_line: usize,
    pub start_col: usize,
    pub end_line: usize,
    pub end_col: usize,
}

impl Span {
    pub fn new(file: PathBuf, start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            file,
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Builds a zero-width span at a byte offset of `source`.
    pub fn at_offset(file: PathBuf, source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count();
        let col = match before.iter().rposition(|b| *b == b'\n') {
            Some(newline) => offset - newline - 1,
            None => offset,
        };
        Self::new(file, line, col, line, col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.file.display(),
            self.start_line + 1,
            self.start_col + 1
        )
    }
}
