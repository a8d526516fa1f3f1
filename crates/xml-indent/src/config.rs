//! Verifier configuration.

use serde::Deserialize;

use crate::error::{Error, Result};

/// The default indent size: 4 columns.
pub const DEFAULT_INDENT_SIZE: usize = 4;

/// Configuration for the indentation verifier.
///
/// The indent unit is the only recognized option. When loaded from a file the
/// key is `indentSize`, matching the attribute name used by checkstyle-style
/// configurations:
///
/// ```rust
/// use xml_indent::IndentConfig;
///
/// let config: IndentConfig = serde_json::from_str(r#"{"indentSize": 2}"#).unwrap();
/// assert_eq!(config.indent_size, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct IndentConfig {
    /// Number of columns a child element is indented relative to its parent.
    pub indent_size: usize,
}

impl Default for IndentConfig {
    fn default() -> Self {
        Self {
            indent_size: DEFAULT_INDENT_SIZE,
        }
    }
}

impl IndentConfig {
    /// Create a configuration with the given indent unit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIndentSize`] if `indent_size` is zero.
    pub fn new(indent_size: usize) -> Result<Self> {
        let config = Self { indent_size };
        config.validate()?;
        Ok(config)
    }

    /// Check that the indent unit is positive.
    pub fn validate(&self) -> Result<()> {
        if self.indent_size == 0 {
            return Err(Error::InvalidIndentSize(self.indent_size));
        }
        Ok(())
    }
}
