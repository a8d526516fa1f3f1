//! Measured indentation.

use std::fmt;

/// An indent occurrence within a document.
///
/// Whitespace of `columns` characters was found immediately before some
/// markup, and the whitespace run ended on `line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentMark {
    /// The line the whitespace run ended on. The first line is 1.
    pub line: usize,

    /// The number of space or tab characters. Tabs count as one column.
    pub columns: usize,
}

impl IndentMark {
    /// The indent in effect before any content has been seen.
    pub const START: IndentMark = IndentMark {
        line: 1,
        columns: 0,
    };

    pub const fn new(line: usize, columns: usize) -> Self {
        Self { line, columns }
    }
}

impl Default for IndentMark {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for IndentMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} columns on line {}", self.columns, self.line)
    }
}

/// Measure the indentation at the end of a buffered whitespace run.
///
/// Scans `text` backwards. If a line break is found, the indentation is the
/// count of spaces and tabs after it. Returns `None` when a non-whitespace
/// character or the start of the buffer is reached first: trailing inline
/// text is not indentation.
pub fn trailing_indent(text: &str) -> Option<usize> {
    let mut columns = 0;
    for ch in text.chars().rev() {
        match ch {
            '\n' | '\r' => return Some(columns),
            ' ' | '\t' => columns += 1,
            _ => return None,
        }
    }
    None
}
