//! Structural parse events consumed by the verifier.

/// A structural parse event for one document.
///
/// Lines are 1-based. Columns are 1-based and point just past the markup that
/// produced the event, the way a SAX locator reports them: for `    <a>` at the
/// start of a line the column is 8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlEvent {
    /// A start tag, or the opening half of an empty element (`<a/>`).
    StartElement {
        name: String,
        line: usize,
        column: usize,
    },

    /// An end tag, or the closing half of an empty element.
    EndElement {
        name: String,
        line: usize,
        column: usize,
    },

    /// Character data. `line` is the line on which the run ends.
    ///
    /// A single text node may be split across several events.
    Characters { text: String, line: usize },
}

impl XmlEvent {
    pub fn start(name: impl Into<String>, line: usize, column: usize) -> Self {
        XmlEvent::StartElement {
            name: name.into(),
            line,
            column,
        }
    }

    pub fn end(name: impl Into<String>, line: usize, column: usize) -> Self {
        XmlEvent::EndElement {
            name: name.into(),
            line,
            column,
        }
    }

    pub fn characters(text: impl Into<String>, line: usize) -> Self {
        XmlEvent::Characters {
            text: text.into(),
            line,
        }
    }
}
