//! Error types for indentation checking.

use std::path::PathBuf;

/// Result type alias for xml-indent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while checking a document.
///
/// None of these are lint findings. Indentation mismatches are reported as
/// [`Violation`](crate::Violation)s and never interrupt a pass.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An end element arrived while no element was open.
    ///
    /// The event source broke its contract. This is fatal for the document.
    #[error(
        "Stack must not be empty when closing the element {name} around line {line} and column {column}"
    )]
    UnbalancedEndElement {
        name: String,
        line: usize,
        column: usize,
    },

    /// The document is not well-formed XML.
    #[error("XML syntax error at {line}:{column}: {message}")]
    XmlSyntax {
        message: String,
        line: usize,
        column: usize,
    },

    /// The configured indent unit is not positive.
    #[error("Invalid indent size {0}: must be at least 1")]
    InvalidIndentSize(usize),

    /// The document could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Whether this error is a parse-level problem with the checked document,
    /// as opposed to a defect in how the verifier was driven.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Error::XmlSyntax { .. })
    }
}
