//! The `quizkeep take` command.

use std::path::PathBuf;

use anyhow::Result;
use tokio::io::BufReader;

use quizkeep_core::parser;
use quizkeep_core::AnswerEvaluator;
use quizkeep_storage::{create_store, AutoSaver, KeyValueStore, ProgressStore};

use crate::shell::QuizShell;

pub async fn execute(key_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = quizkeep_core::load_config_from(config_path.as_deref())?;
    let key_path = key_path.unwrap_or_else(|| config.answer_key.clone());
    let key = parser::parse_answer_key(&key_path)?;

    for w in parser::validate_answer_key(&key) {
        tracing::warn!(question = ?w.question_id, "{}", w.message);
    }

    let store = create_store(&config);
    tracing::debug!(store = store.name(), dir = %config.data_dir.display(), "opened progress store");
    let progress = ProgressStore::new(store, config.storage_key.clone());
    let saver = AutoSaver::new(progress.clone(), config.auto_save_delay());

    println!("{}", key.name);
    if !key.description.is_empty() {
        println!("{}", key.description);
    }

    let evaluator = AnswerEvaluator::new(key, config.pass_threshold);
    let shell = QuizShell::new(evaluator, progress, saver);

    let input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    shell.run(input, &mut out).await?;

    Ok(())
}
