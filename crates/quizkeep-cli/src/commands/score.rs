//! The `quizkeep score` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkeep_core::parser;
use quizkeep_core::AnswerEvaluator;

use crate::render;

pub fn execute(
    key_path: PathBuf,
    answers_path: PathBuf,
    threshold: Option<f64>,
    fail_under: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let threshold = match threshold {
        Some(t) => t,
        None => quizkeep_core::load_config_from(config_path.as_deref())?.pass_threshold,
    };
    anyhow::ensure!(
        (0.0..=100.0).contains(&threshold),
        "threshold must be between 0 and 100"
    );

    let key = parser::parse_answer_key(&key_path)?;
    let submission = parser::load_submission(&answers_path)?;

    let unknown: Vec<&str> = submission
        .iter()
        .map(|(id, _)| id)
        .filter(|id| key.get(id).is_none())
        .collect();
    if !unknown.is_empty() {
        eprintln!(
            "Warning: ignoring answers for unknown questions: {}",
            unknown.join(", ")
        );
    }

    let evaluator = AnswerEvaluator::new(key, threshold);
    let grade = evaluator.grade(&submission)?;

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&grade)?),
        "text" => {
            println!("{}", render::score_table(&grade, evaluator.key()));
            println!("{}", render::result_message(&grade));
            println!(
                "{}",
                render::progress_bar(grade.scorecard.result.percentage)
            );
        }
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }

    if fail_under && !grade.passing {
        anyhow::bail!(
            "score {:.1}% is below the pass threshold of {threshold}%",
            grade.scorecard.result.percentage
        );
    }

    Ok(())
}
