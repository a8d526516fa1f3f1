//! The indentation state machine.
//!
//! The verifier reconstructs the current indentation from character events
//! that arrive in arbitrary chunks. Each open element gets a [`StackFrame`]
//! remembering both the indentation that was found and the indentation that
//! was expected. After a violation the expected value is corrected, so the
//! element's descendants are judged against the intended layout and one
//! misplaced element yields one finding rather than one per descendant.

use tracing::{debug, trace};

use crate::config::IndentConfig;
use crate::error::{Error, Result};
use crate::event::XmlEvent;
use crate::indent::{IndentMark, trailing_indent};
use crate::violation::Violation;

/// An open element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackFrame {
    /// The element's qualified name.
    pub tag: String,

    /// The indentation measured before the start tag.
    pub found: IndentMark,

    /// The indentation the start tag should have had. Equal to `found` unless
    /// a violation was reported for this element.
    pub expected: IndentMark,
}

impl StackFrame {
    fn new(tag: String, found: IndentMark) -> Self {
        Self {
            tag,
            found,
            expected: found,
        }
    }
}

/// Verifies the indentation of a single document.
///
/// Create one per document and feed it the document's events in order.
#[derive(Debug)]
pub struct IndentVerifier {
    indent_size: usize,

    /// Open elements, innermost last.
    stack: Vec<StackFrame>,

    /// The most recently measured indentation.
    last_indent: IndentMark,

    /// Characters seen since the last markup event.
    pending_text: String,

    /// The line on which `pending_text` ends.
    pending_line: usize,

    violations: Vec<Violation>,
}

impl IndentVerifier {
    pub fn new(config: &IndentConfig) -> Self {
        Self {
            indent_size: config.indent_size,
            stack: Vec::new(),
            last_indent: IndentMark::START,
            pending_text: String::new(),
            pending_line: IndentMark::START.line,
            violations: Vec::new(),
        }
    }

    /// Process one event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnbalancedEndElement`] for an end element with no open
    /// element. The document cannot be checked any further after that.
    pub fn handle(&mut self, event: XmlEvent) -> Result<()> {
        match event {
            XmlEvent::StartElement { name, line, column } => {
                self.on_start_element(name, line, column);
                Ok(())
            }
            XmlEvent::EndElement { name, line, column } => {
                self.on_end_element(&name, line, column)
            }
            XmlEvent::Characters { text, line } => {
                self.on_text(&text, line);
                Ok(())
            }
        }
    }

    pub fn on_text(&mut self, text: &str, line: usize) {
        self.pending_text.push_str(text);
        self.pending_line = line;
    }

    pub fn on_start_element(&mut self, tag: impl Into<String>, line: usize, column: usize) {
        self.flush_text();
        let tag = tag.into();
        let found = self.last_indent;

        let parent = self
            .stack
            .last()
            .map(|parent| (parent.found.line, parent.expected.columns));

        let frame = match parent {
            // Same line as the parent's start tag: nothing to compare.
            Some((parent_line, _)) if found.line == parent_line => StackFrame::new(tag, found),
            Some((_, parent_columns)) => {
                let expected = parent_columns + self.indent_size;
                if found.columns == expected {
                    StackFrame::new(tag, found)
                } else {
                    self.report(Violation::before_start_element(line, column, expected, &tag));
                    StackFrame {
                        tag,
                        found,
                        expected: IndentMark::new(found.line, expected),
                    }
                }
            }
            None => StackFrame::new(tag, found),
        };

        trace!(tag = %frame.tag, depth = self.stack.len(), found = %frame.found, "push");
        self.stack.push(frame);
    }

    pub fn on_end_element(&mut self, tag: &str, line: usize, column: usize) -> Result<()> {
        self.flush_text();
        let frame = self.stack.pop().ok_or_else(|| Error::UnbalancedEndElement {
            name: tag.to_string(),
            line,
            column,
        })?;
        trace!(tag = %frame.tag, depth = self.stack.len(), "pop");

        // An end tag on its own line must line up with its start tag.
        if self.last_indent.line != frame.found.line
            && self.last_indent.columns != frame.expected.columns
        {
            self.report(Violation::before_end_element(
                line,
                column,
                frame.expected.columns,
                tag,
            ));
        }
        Ok(())
    }

    /// Resolve the pending character run into `last_indent`.
    fn flush_text(&mut self) {
        if let Some(columns) = trailing_indent(&self.pending_text) {
            self.last_indent = IndentMark::new(self.pending_line, columns);
        }
        self.pending_text.clear();
    }

    fn report(&mut self, violation: Violation) {
        debug!(line = violation.line, column = violation.column, "{}", violation.message);
        self.violations.push(violation);
    }

    /// Currently open elements, outermost first.
    pub fn stack(&self) -> &[StackFrame] {
        &self.stack
    }

    pub fn last_indent(&self) -> IndentMark {
        self.last_indent
    }

    /// Violations recorded so far, in document order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consume the verifier, returning all recorded violations.
    pub fn finish(self) -> Vec<Violation> {
        self.violations
    }
}

/// Verify a complete event stream for one document.
///
/// # Errors
///
/// Stops at the first [`Error::UnbalancedEndElement`].
pub fn verify_events<I>(config: &IndentConfig, events: I) -> Result<Vec<Violation>>
where
    I: IntoIterator<Item = XmlEvent>,
{
    let mut verifier = IndentVerifier::new(config);
    for event in events {
        verifier.handle(event)?;
    }
    Ok(verifier.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(indent_size: usize) -> IndentConfig {
        IndentConfig::new(indent_size).unwrap()
    }

    fn messages(violations: &[Violation]) -> Vec<String> {
        violations.iter().map(|v| v.to_string()).collect()
    }

    /// `<root>` / `    <parent-1>` / `        <text-1>text</text-1>` /
    /// `    </parent-1>` / `</root>`, starting on line 3.
    fn four_space_document() -> Vec<XmlEvent> {
        vec![
            XmlEvent::start("root", 3, 7),
            XmlEvent::characters("\n    ", 4),
            XmlEvent::start("parent-1", 4, 15),
            XmlEvent::characters("\n        ", 5),
            XmlEvent::start("text-1", 5, 17),
            XmlEvent::characters("text", 5),
            XmlEvent::end("text-1", 5, 30),
            XmlEvent::characters("\n    ", 6),
            XmlEvent::end("parent-1", 6, 16),
            XmlEvent::characters("\n", 7),
            XmlEvent::end("root", 7, 8),
        ]
    }

    #[test]
    fn test_correct_document() {
        let violations = verify_events(&config(4), four_space_document()).unwrap();
        assert!(violations.is_empty());
    }

    #[test]
    fn test_larger_divisible_unit() {
        let violations = verify_events(&config(8), four_space_document()).unwrap();
        assert_eq!(
            messages(&violations),
            vec![
                "4:15: Expected indent 8 before start element <parent-1>",
                "5:17: Expected indent 16 before start element <text-1>",
                "6:16: Expected indent 8 before end element </parent-1>",
            ]
        );
    }

    #[test]
    fn test_smaller_divisible_unit() {
        let violations = verify_events(&config(2), four_space_document()).unwrap();
        assert_eq!(
            messages(&violations),
            vec![
                "4:15: Expected indent 2 before start element <parent-1>",
                "5:17: Expected indent 4 before start element <text-1>",
                "6:16: Expected indent 2 before end element </parent-1>",
            ]
        );
    }

    #[test]
    fn test_expected_indent_is_corrected() {
        // <b> is one unit too deep and its children follow <b>, so they are
        // judged against the corrected depth rather than <b>'s actual one.
        let events = vec![
            XmlEvent::start("a", 1, 4),
            XmlEvent::characters("\n        ", 2),
            XmlEvent::start("b", 2, 12),
            XmlEvent::characters("\n            ", 3),
            XmlEvent::start("c", 3, 17),
            XmlEvent::end("c", 3, 17),
            XmlEvent::characters("\n            ", 4),
            XmlEvent::start("d", 4, 17),
            XmlEvent::end("d", 4, 17),
            XmlEvent::characters("\n        ", 5),
            XmlEvent::end("b", 5, 13),
            XmlEvent::characters("\n", 6),
            XmlEvent::end("a", 6, 5),
        ];

        let mut verifier = IndentVerifier::new(&config(4));
        for event in events.iter().take(3).cloned() {
            verifier.handle(event).unwrap();
        }
        let b = &verifier.stack()[1];
        assert_eq!(b.found, IndentMark::new(2, 8));
        assert_eq!(b.expected, IndentMark::new(2, 4));

        for event in events.into_iter().skip(3) {
            verifier.handle(event).unwrap();
        }
        let violations = verifier.finish();
        assert_eq!(
            messages(&violations),
            vec![
                "2:12: Expected indent 4 before start element <b>",
                "3:17: Expected indent 8 before start element <c>",
                "4:17: Expected indent 8 before start element <d>",
                "5:13: Expected indent 4 before end element </b>",
            ]
        );
    }

    #[test]
    fn test_properly_indented_descendants_of_misplaced_element() {
        // <b> is at 2 instead of 4. Everything below it sits where it would
        // under a correctly placed <b>, so only <b>'s start tag is reported.
        let events = vec![
            XmlEvent::start("a", 1, 4),
            XmlEvent::characters("\n  ", 2),
            XmlEvent::start("b", 2, 6),
            XmlEvent::characters("\n        ", 3),
            XmlEvent::start("c", 3, 12),
            XmlEvent::characters("\n            ", 4),
            XmlEvent::start("d", 4, 17),
            XmlEvent::end("d", 4, 17),
            XmlEvent::characters("\n        ", 5),
            XmlEvent::end("c", 5, 13),
            XmlEvent::characters("\n    ", 6),
            XmlEvent::end("b", 6, 9),
            XmlEvent::characters("\n", 7),
            XmlEvent::end("a", 7, 5),
        ];

        let violations = verify_events(&config(4), events).unwrap();
        assert_eq!(
            messages(&violations),
            vec!["2:6: Expected indent 4 before start element <b>"]
        );
    }

    #[test]
    fn test_same_line_exemption() {
        for unit in [1, 2, 3, 4, 8] {
            let events = vec![
                XmlEvent::start("a", 1, 4),
                XmlEvent::start("b", 1, 7),
                XmlEvent::characters("text", 1),
                XmlEvent::end("b", 1, 15),
                XmlEvent::end("a", 1, 19),
            ];
            let violations = verify_events(&config(unit), events).unwrap();
            assert!(violations.is_empty(), "unit {unit}: {violations:?}");
        }
    }

    #[test]
    fn test_same_line_child_after_space() {
        // `<a> <b/>` on line 2, after a correctly placed parent.
        let events = vec![
            XmlEvent::start("root", 1, 7),
            XmlEvent::characters("\n    ", 2),
            XmlEvent::start("a", 2, 8),
            XmlEvent::characters(" ", 2),
            XmlEvent::start("b", 2, 13),
            XmlEvent::end("b", 2, 13),
            XmlEvent::end("a", 2, 17),
            XmlEvent::characters("\n", 3),
            XmlEvent::end("root", 3, 8),
        ];
        assert!(verify_events(&config(4), events).unwrap().is_empty());
    }

    #[test]
    fn test_misaligned_end_tag() {
        let newline = |columns: usize| format!("\n{}", " ".repeat(columns));

        for depth in 1..5 {
            let mut events = vec![XmlEvent::start("e0", 1, 5)];
            for level in 1..=depth {
                events.push(XmlEvent::characters(newline(level * 4), level + 1));
                events.push(XmlEvent::start(format!("e{level}"), level + 1, level * 4 + 5));
            }
            // Innermost element closes on its own line, one unit too deep.
            let mut line = depth + 2;
            events.push(XmlEvent::characters(newline(depth * 4 + 4), line));
            events.push(XmlEvent::end(format!("e{depth}"), line, depth * 4 + 10));
            for level in (0..depth).rev() {
                line += 1;
                events.push(XmlEvent::characters(newline(level * 4), line));
                events.push(XmlEvent::end(format!("e{level}"), line, level * 4 + 6));
            }

            let violations = verify_events(&config(4), events).unwrap();
            assert_eq!(violations.len(), 1, "depth {depth}: {violations:?}");
            assert_eq!(
                violations[0].message,
                format!("Expected indent {} before end element </e{depth}>", depth * 4)
            );
        }
    }

    #[test]
    fn test_end_tag_after_inline_text_uses_start_line() {
        // `    <b>text` / `more</b>`: the closing tag follows text, so the
        // indent stays at the value measured before <b>.
        let events = vec![
            XmlEvent::start("a", 1, 4),
            XmlEvent::characters("\n    ", 2),
            XmlEvent::start("b", 2, 8),
            XmlEvent::characters("text\nmore", 3),
            XmlEvent::end("b", 3, 9),
            XmlEvent::characters("\n", 4),
            XmlEvent::end("a", 4, 5),
        ];
        assert!(verify_events(&config(4), events).unwrap().is_empty());
    }

    #[test]
    fn test_chunked_characters() {
        let events = vec![
            XmlEvent::start("a", 1, 4),
            XmlEvent::characters("\n", 2),
            XmlEvent::characters("  ", 2),
            XmlEvent::characters("  ", 2),
            XmlEvent::start("b", 2, 8),
            XmlEvent::end("b", 2, 8),
            XmlEvent::characters("\n", 3),
            XmlEvent::end("a", 3, 5),
        ];
        assert!(verify_events(&config(4), events).unwrap().is_empty());
    }

    #[test]
    fn test_tabs_count_as_one_column() {
        let events = vec![
            XmlEvent::start("a", 1, 4),
            XmlEvent::characters("\n\t", 2),
            XmlEvent::start("b", 2, 5),
            XmlEvent::end("b", 2, 5),
            XmlEvent::characters("\n", 3),
            XmlEvent::end("a", 3, 5),
        ];
        assert!(verify_events(&config(1), events.clone()).unwrap().is_empty());

        let violations = verify_events(&config(4), events).unwrap();
        assert_eq!(
            messages(&violations),
            vec!["2:5: Expected indent 4 before start element <b>"]
        );
    }

    #[test]
    fn test_end_element_with_empty_stack_is_fatal() {
        let mut verifier = IndentVerifier::new(&config(4));
        let err = verifier.handle(XmlEvent::end("a", 1, 5)).unwrap_err();
        assert!(matches!(
            err,
            Error::UnbalancedEndElement { ref name, line: 1, column: 5 } if name == "a"
        ));

        let events = vec![
            XmlEvent::start("a", 1, 4),
            XmlEvent::end("a", 1, 8),
            XmlEvent::end("a", 1, 12),
        ];
        assert!(verify_events(&config(4), events).is_err());
    }

    #[test]
    fn test_stack_empty_after_root_closes() {
        let mut verifier = IndentVerifier::new(&config(4));
        for event in four_space_document() {
            verifier.handle(event).unwrap();
        }
        assert!(verifier.stack().is_empty());
        assert_eq!(verifier.last_indent(), IndentMark::new(7, 0));
    }
}
