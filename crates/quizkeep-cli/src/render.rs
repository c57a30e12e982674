//! Human-readable output for grades and progress.

use comfy_table::{Cell, Table};

use quizkeep_core::{AnswerKey, Grade};

const BAR_WIDTH: usize = 20;

/// The sentence shown after a quiz is submitted.
pub fn result_message(grade: &Grade) -> String {
    let percentage = grade.scorecard.result.percentage;
    if grade.passing {
        format!("Excellent! You scored {percentage:.1}% correct answers.")
    } else {
        format!("You scored {percentage:.1}%. Would you like to try again?")
    }
}

/// A fixed-width text progress bar, e.g. `[##########----------]  50%`.
pub fn progress_bar(percentage: f64) -> String {
    let clamped = if percentage.is_finite() {
        percentage.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        clamped
    )
}

/// Per-question breakdown of a grade.
pub fn score_table(grade: &Grade, key: &AnswerKey) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Question", "Prompt", "Points", "Correct"]);

    for outcome in &grade.scorecard.questions {
        let prompt = key
            .get(&outcome.id)
            .map(|q| q.prompt.as_str())
            .unwrap_or_default();
        table.add_row(vec![
            Cell::new(&outcome.id),
            Cell::new(prompt),
            Cell::new(format!("{}", outcome.points)),
            Cell::new(if outcome.correct { "yes" } else { "no" }),
        ]);
    }

    let result = &grade.scorecard.result;
    table.add_row(vec![
        Cell::new("total"),
        Cell::new(""),
        Cell::new(format!("{} / {}", result.earned_points, result.max_points)),
        Cell::new(format!("{:.1}%", result.percentage)),
    ]);

    table
}
