use anyhow::{Context, Result};
use std::path::Path;
use xml_indent::IndentConfig;

/// Resolve the verifier configuration.
///
/// Starts from the defaults, applies a JSON config file if given (for example
/// `{"indentSize": 2}`), then the `--indent-size` flag.
pub fn resolve_config(
    config_file: Option<&Path>,
    indent_size: Option<usize>,
) -> Result<IndentConfig> {
    let mut config = match config_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Invalid config file: {}", path.display()))?
        }
        None => IndentConfig::default(),
    };

    if let Some(indent_size) = indent_size {
        config.indent_size = indent_size;
    }

    config.validate()?;
    Ok(config)
}
