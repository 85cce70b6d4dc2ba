pub mod check;
pub mod init;
pub mod inspect;
pub mod presave;
pub mod upgrade;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use markwords_core::parser::ContentFormat;

/// Read a content file as an untyped JSON value, whatever its format.
pub(crate) fn read_raw_content(path: &Path) -> Result<serde_json::Value> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read content file: {}", path.display()))?;
    let value = match ContentFormat::from_path(path)? {
        ContentFormat::Json => serde_json::from_str(&text)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?,
        ContentFormat::Toml => toml::from_str(&text)
            .with_context(|| format!("failed to parse TOML: {}", path.display()))?,
    };
    Ok(value)
}
