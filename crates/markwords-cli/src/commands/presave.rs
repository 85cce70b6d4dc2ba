//! The `markwords presave` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(content: PathBuf) -> Result<()> {
    let value = super::read_raw_content(&content)?;
    let result = markwords_editor::presave(&value)?;
    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
