//! Indentation violations.

use serde::Serialize;
use std::fmt;

/// A single indentation finding.
///
/// `line` and `column` locate the markup the finding is about, using the same
/// convention as [`XmlEvent`](crate::XmlEvent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Violation {
    pub fn before_start_element(line: usize, column: usize, expected: usize, tag: &str) -> Self {
        Self {
            line,
            column,
            message: format!("Expected indent {} before start element <{}>", expected, tag),
        }
    }

    pub fn before_end_element(line: usize, column: usize, expected: usize, tag: &str) -> Self {
        Self {
            line,
            column,
            message: format!("Expected indent {} before end element </{}>", expected, tag),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}
