//! Indentation conformance checking for XML documents.
//!
//! The crate verifies that every element of an XML document is indented by
//! exactly one indent unit relative to its parent, and that every end tag that
//! sits on its own line lines up with its start tag.
//!
//! # Overview
//!
//! The main types are:
//! - [`IndentVerifier`]: The state machine. It consumes [`XmlEvent`]s for one
//!   document, in order, and collects [`Violation`]s.
//! - [`XmlEvent`]: A structural parse event (start tag, end tag, characters).
//! - [`IndentConfig`]: The indent unit, 4 columns unless configured otherwise.
//!
//! The verifier does not parse XML itself. [`check_str`] and [`check_file`]
//! drive it from a [`quick-xml`](quick_xml) reader, but any event source works:
//!
//! ```rust
//! use xml_indent::{IndentConfig, XmlEvent, verify_events};
//!
//! let events = vec![
//!     XmlEvent::start("root", 1, 7),
//!     XmlEvent::characters("\n  ", 2),
//!     XmlEvent::start("child", 2, 10),
//!     XmlEvent::end("child", 2, 18),
//!     XmlEvent::characters("\n", 3),
//!     XmlEvent::end("root", 3, 8),
//! ];
//!
//! let violations = verify_events(&IndentConfig::default(), events).unwrap();
//! assert_eq!(violations.len(), 1);
//! assert_eq!(
//!     violations[0].message,
//!     "Expected indent 4 before start element <child>"
//! );
//! ```
//!
//! # Checking documents
//!
//! ```rust
//! use xml_indent::{IndentConfig, check_str};
//!
//! let xml = "<root>\n    <child/>\n</root>\n";
//! assert!(check_str(xml, &IndentConfig::default()).unwrap().is_empty());
//!
//! let violations = check_str(xml, &IndentConfig::new(2).unwrap()).unwrap();
//! assert_eq!(violations[0].to_string(), "2:13: Expected indent 2 before start element <child>");
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod indent;
pub mod line_index;
pub mod reader;
pub mod verifier;
pub mod violation;

// Re-export main types
pub use config::{DEFAULT_INDENT_SIZE, IndentConfig};
pub use error::{Error, Result};
pub use event::XmlEvent;
pub use indent::IndentMark;
pub use reader::{check_file, check_str, read_events};
pub use verifier::{IndentVerifier, StackFrame, verify_events};
pub use violation::Violation;
