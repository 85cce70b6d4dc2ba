//! The `markwords inspect` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};
use markwords_core::{Exercise, QuestionContract};

pub fn execute(content: PathBuf) -> Result<()> {
    let params = markwords_core::parser::parse_content(&content)?;
    let exercise = Exercise::new(params);

    let mut table = Table::new();
    table.set_header(vec!["#", "Word", "Answer", "Prefix", "Suffix"]);
    for (index, word) in exercise.words().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(word.text()),
            Cell::new(if word.is_answer() { "yes" } else { "" }),
            Cell::new(word.prefix()),
            Cell::new(word.suffix()),
        ]);
    }
    println!("{table}");

    let answers = exercise.answer_indices().len();
    println!(
        "{} selectable word(s), {} answer(s), max score {}",
        exercise.words().len(),
        answers,
        exercise.max_score()
    );
    if exercise.policy().blank_is_correct() {
        println!("No answers marked: selecting nothing is correct.");
    }

    Ok(())
}
