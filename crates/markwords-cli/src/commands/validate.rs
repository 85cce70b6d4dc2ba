//! The `markwords validate` command.

use std::path::PathBuf;

use anyhow::Result;
use markwords_core::Exercise;

pub fn execute(content_path: PathBuf) -> Result<()> {
    let contents = if content_path.is_dir() {
        markwords_core::parser::load_content_directory(&content_path)?
    } else {
        let params = markwords_core::parser::parse_content(&content_path)?;
        vec![(content_path.clone(), params)]
    };

    anyhow::ensure!(
        !contents.is_empty(),
        "no content files found in {}",
        content_path.display()
    );

    let mut total_warnings = 0;

    for (path, params) in &contents {
        let words = Exercise::new(params.clone()).words().len();
        println!("Content: {} ({words} selectable words)", path.display());

        let warnings = markwords_core::parser::validate_params(params);
        for w in &warnings {
            let prefix = w
                .word
                .map(|index| format!("  [word {index}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All content valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
