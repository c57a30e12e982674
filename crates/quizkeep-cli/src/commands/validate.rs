//! The `quizkeep validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(key_path: PathBuf) -> Result<()> {
    let key = quizkeep_core::parser::parse_answer_key(&key_path)?;

    println!("Answer key: {} ({} questions)", key.name, key.len());

    let warnings = quizkeep_core::parser::validate_answer_key(&key);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Answer key valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
