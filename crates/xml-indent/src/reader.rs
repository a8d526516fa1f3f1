//! XML event source built on quick-xml.
//!
//! Turns XML text into the [`XmlEvent`] stream the verifier consumes, with
//! SAX-style locations: each event is located just past its markup.
//!
//! Character and predefined entity references are expanded. Every other
//! entity, internal or external, resolves to empty content, and DOCTYPE
//! declarations are skipped, so checking a document never fetches anything.

use std::path::Path;

use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use tracing::debug;

use crate::config::IndentConfig;
use crate::error::{Error, Result};
use crate::event::XmlEvent;
use crate::line_index::LineIndex;
use crate::verifier::IndentVerifier;
use crate::violation::Violation;

/// Check the indentation of an XML document held in memory.
///
/// # Example
///
/// ```rust
/// use xml_indent::{IndentConfig, check_str};
///
/// let violations = check_str("<a>\n  <b/>\n</a>", &IndentConfig::default()).unwrap();
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].message, "Expected indent 4 before start element <b>");
/// ```
///
/// # Errors
///
/// Returns [`Error::XmlSyntax`] if the document is malformed. No violations
/// are reported for such a document.
pub fn check_str(content: &str, config: &IndentConfig) -> Result<Vec<Violation>> {
    config.validate()?;
    let mut verifier = IndentVerifier::new(config);
    XmlEventReader::new(content).run(|event| verifier.handle(event))?;
    Ok(verifier.finish())
}

/// Check the indentation of an XML file.
///
/// The file must be UTF-8 encoded.
pub fn check_file(path: &Path, config: &IndentConfig) -> Result<Vec<Violation>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "checking");
    check_str(&content, config)
}

/// Read a whole document into its event stream.
///
/// # Example
///
/// ```rust
/// use xml_indent::{XmlEvent, read_events};
///
/// let events = read_events("<a>\n  <b/>\n</a>").unwrap();
/// assert_eq!(
///     events,
///     vec![
///         XmlEvent::start("a", 1, 4),
///         XmlEvent::characters("\n  ", 2),
///         XmlEvent::start("b", 2, 7),
///         XmlEvent::end("b", 2, 7),
///         XmlEvent::characters("\n", 3),
///         XmlEvent::end("a", 3, 5),
///     ]
/// );
/// ```
pub fn read_events(content: &str) -> Result<Vec<XmlEvent>> {
    let mut events = Vec::new();
    XmlEventReader::new(content).run(|event| {
        events.push(event);
        Ok(())
    })?;
    Ok(events)
}

/// Internal reader state.
struct XmlEventReader<'a> {
    /// The quick-xml reader.
    reader: Reader<&'a [u8]>,

    /// Line lookups for event positions.
    index: LineIndex<'a>,

    /// Names of the currently open elements.
    open: Vec<String>,

    /// Whether the root element has been closed.
    root_closed: bool,
}

impl<'a> XmlEventReader<'a> {
    fn new(content: &'a str) -> Self {
        let mut reader = Reader::from_str(content);
        reader.config_mut().trim_text_start = false;
        reader.config_mut().trim_text_end = false;

        Self {
            reader,
            index: LineIndex::new(content),
            open: Vec::new(),
            root_closed: false,
        }
    }

    fn run<F>(mut self, mut emit: F) -> Result<()>
    where
        F: FnMut(XmlEvent) -> Result<()>,
    {
        loop {
            let event_start = self.reader.buffer_position() as usize;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let name = self.start_name(&e, event_start)?;
                    let (line, column) = self.position();
                    self.open.push(name.clone());
                    emit(XmlEvent::StartElement { name, line, column })?;
                }
                Ok(Event::End(e)) => {
                    let name = self.end_name(&e, event_start)?;
                    let (line, column) = self.position();
                    emit(XmlEvent::EndElement { name, line, column })?;
                }
                Ok(Event::Empty(e)) => {
                    let name = self.start_name(&e, event_start)?;
                    let (line, column) = self.position();
                    self.open.push(name.clone());
                    emit(XmlEvent::StartElement {
                        name: name.clone(),
                        line,
                        column,
                    })?;
                    self.close_element(&name, event_start)?;
                    emit(XmlEvent::EndElement { name, line, column })?;
                }
                Ok(Event::Text(e)) => {
                    if self.open.is_empty() {
                        self.check_outside_root(&String::from_utf8_lossy(&e), event_start)?;
                    } else {
                        let text = e
                            .unescape_with(resolve_entity)
                            .map_err(|err| {
                                self.syntax_error(
                                    format!("Invalid text content: {}", err),
                                    event_start,
                                )
                            })?
                            .into_owned();
                        emit(XmlEvent::Characters {
                            text,
                            line: self.line(),
                        })?;
                    }
                }
                Ok(Event::CData(e)) => {
                    if self.open.is_empty() {
                        return Err(self.syntax_error(
                            "CDATA section outside the root element".to_string(),
                            event_start,
                        ));
                    }
                    let text = String::from_utf8_lossy(&e).into_owned();
                    emit(XmlEvent::Characters {
                        text,
                        line: self.line(),
                    })?;
                }
                Ok(Event::Comment(_) | Event::PI(_) | Event::Decl(_) | Event::DocType(_)) => {
                    // No events: surrounding whitespace stays in one run
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    let offset = self.reader.error_position() as usize;
                    return Err(self.syntax_error(e.to_string(), offset));
                }
            }
        }

        if let Some(name) = self.open.last() {
            let end = self.reader.buffer_position() as usize;
            return Err(self.syntax_error(
                format!("Unexpected end of input, expected closing tag </{}>", name),
                end,
            ));
        }
        if !self.root_closed {
            return Err(self.syntax_error("Document contains no root element".to_string(), 0));
        }
        Ok(())
    }

    fn start_name(&self, e: &BytesStart<'_>, event_start: usize) -> Result<String> {
        if self.open.is_empty() && self.root_closed {
            return Err(self.syntax_error(
                "Markup following the root element must be well-formed: multiple root elements"
                    .to_string(),
                event_start,
            ));
        }
        Ok(String::from_utf8_lossy(e.name().as_ref()).into_owned())
    }

    fn end_name(&mut self, e: &BytesEnd<'_>, event_start: usize) -> Result<String> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
        self.close_element(&name, event_start)?;
        Ok(name)
    }

    /// Close the innermost open element, which must be `name`.
    fn close_element(&mut self, name: &str, event_start: usize) -> Result<()> {
        match self.open.pop() {
            Some(open) if open == name => {
                if self.open.is_empty() {
                    self.root_closed = true;
                }
                Ok(())
            }
            Some(open) => Err(self.syntax_error(
                format!("Mismatched end tag: expected </{}>, found </{}>", open, name),
                event_start,
            )),
            None => Err(self.syntax_error(
                format!("Unexpected closing tag </{}>", name),
                event_start,
            )),
        }
    }

    /// Only whitespace may appear before or after the root element.
    fn check_outside_root(&self, text: &str, event_start: usize) -> Result<()> {
        let stray = text
            .char_indices()
            .find(|&(_, ch)| !matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{feff}'));
        match stray {
            Some((idx, _)) => {
                let place = if self.root_closed { "after" } else { "before" };
                Err(self.syntax_error(
                    format!("Content is not allowed {} the root element", place),
                    event_start + idx,
                ))
            }
            None => Ok(()),
        }
    }

    /// Location just past the last event read.
    fn position(&self) -> (usize, usize) {
        self.index.location(self.reader.buffer_position() as usize)
    }

    fn line(&self) -> usize {
        self.index.line(self.reader.buffer_position() as usize)
    }

    fn syntax_error(&self, message: String, offset: usize) -> Error {
        let (line, column) = self.index.location(offset);
        Error::XmlSyntax {
            message,
            line,
            column,
        }
    }
}

/// Expand predefined entities and resolve every other entity to nothing.
fn resolve_entity(name: &str) -> Option<&'static str> {
    resolve_predefined_entity(name).or(Some(""))
}
