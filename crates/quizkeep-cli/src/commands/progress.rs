//! The `quizkeep progress` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkeep_core::{completion, parser};
use quizkeep_storage::{create_store, ProgressStore, RestoreError};

use crate::render;

pub async fn execute(key_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = quizkeep_core::load_config_from(config_path.as_deref())?;
    let progress = ProgressStore::new(create_store(&config), config.storage_key.clone());

    let submission = match progress.try_restore().await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            println!("No saved progress.");
            return Ok(());
        }
        Err(RestoreError::Decode(e)) => {
            println!("Saved progress is corrupted and will be ignored: {e}");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!("Saved answers ({}):", progress.key());
    for (id, answer) in submission.iter() {
        if answer.trim().is_empty() {
            println!("  {id}: (blank)");
        } else {
            println!("  {id}: {answer}");
        }
    }

    // Completion needs the key; an explicit path must load, the configured default may be absent
    let key = match key_path {
        Some(path) => Some(parser::parse_answer_key(&path)?),
        None if config.answer_key.exists() => Some(parser::parse_answer_key(&config.answer_key)?),
        None => None,
    };
    if let Some(key) = key {
        println!(
            "Completion {}",
            render::progress_bar(completion(&submission, &key))
        );
    }

    Ok(())
}
