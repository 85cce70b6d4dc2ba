//! The `markwords init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create markwords.toml
    if std::path::Path::new("markwords.toml").exists() {
        println!("markwords.toml already exists, skipping.");
    } else {
        std::fs::write("markwords.toml", SAMPLE_CONFIG)?;
        println!("Created markwords.toml");
    }

    // Create example content
    std::fs::create_dir_all("content")?;
    let example_path = std::path::Path::new("content/example.json");
    if example_path.exists() {
        println!("content/example.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CONTENT)?;
        println!("Created content/example.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit markwords.toml with your LMS activity base and learner");
    println!("  2. Run: markwords validate --content content/example.json");
    println!("  3. Run: markwords check --content content/example.json --select 1,7");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# markwords report configuration

language = "en-US"
activity_base = "http://localhost/h5p/content"
actor_name = "${USER}"
# actor_mbox = "learner@example.org"
"#;

const EXAMPLE_CONTENT: &str = r#"{
  "taskDescription": "<p>Click the adjectives in the sentence below.</p>",
  "textField": "<p>The *quick* brown fox jumps over the *lazy* dog.</p>",
  "behaviour": {
    "enableRetry": true,
    "enableSolutionsButton": true
  },
  "checkAnswerButton": "Check",
  "tryAgainButton": "Retry",
  "showSolutionButton": "Show solution",
  "score": "You got @score of @total points"
}
"#;
