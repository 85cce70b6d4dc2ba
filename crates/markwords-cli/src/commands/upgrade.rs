//! The `markwords upgrade` command.

use std::path::PathBuf;

use anyhow::Result;
use markwords_editor::ContentVersion;

pub fn execute(content: PathBuf, from: String) -> Result<()> {
    let from: ContentVersion = from.parse()?;
    let value = super::read_raw_content(&content)?;
    let upgraded = markwords_editor::upgrade_content(from, value)?;
    println!("{}", serde_json::to_string_pretty(&upgraded)?);
    Ok(())
}
