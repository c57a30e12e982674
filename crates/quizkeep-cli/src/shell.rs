//! The interactive quiz loop.
//!
//! Reads one answer per line, auto-saves as answers come in, and grades
//! the live answers once every required question has one.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use quizkeep_core::{AnswerEvaluator, Grade, Submission};
use quizkeep_storage::{AutoSaver, ProgressStore};

use crate::render;

/// Drives one quiz attempt against injected services.
pub struct QuizShell {
    evaluator: AnswerEvaluator,
    progress: ProgressStore,
    saver: AutoSaver,
}

impl QuizShell {
    pub fn new(evaluator: AnswerEvaluator, progress: ProgressStore, saver: AutoSaver) -> Self {
        Self {
            evaluator,
            progress,
            saver,
        }
    }

    /// Run the quiz until it is submitted or input ends.
    ///
    /// Returns `None` when input ended before submission; answers given so
    /// far are saved either way.
    pub async fn run<R, W>(self, input: R, out: &mut W) -> Result<Option<Grade>>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let QuizShell {
            evaluator,
            progress,
            saver,
        } = self;

        let mut answers = progress.restore().await.unwrap_or_default();
        if !answers.is_empty() {
            writeln!(
                out,
                "Restored saved answers {}",
                render::progress_bar(evaluator.completion(&answers))
            )?;
        }

        let mut lines = input.lines();
        let mut pending: Vec<String> = evaluator
            .key()
            .questions()
            .map(|(id, _)| id.to_string())
            .collect();

        let submitted = loop {
            let total = pending.len();
            let mut ended = false;

            for (i, id) in pending.iter().enumerate() {
                let Some(question) = evaluator.key().get(id) else {
                    continue;
                };
                let prompt = if question.prompt.trim().is_empty() {
                    id.as_str()
                } else {
                    question.prompt.as_str()
                };
                writeln!(out, "\n[{}/{}] {}", i + 1, total, prompt)?;
                if let Some(saved) = answers.answer(id).filter(|a| !a.trim().is_empty()) {
                    writeln!(out, "  saved answer: {saved} (press Enter to keep it)")?;
                }
                write!(out, "> ")?;
                out.flush()?;

                let Some(line) = lines.next_line().await? else {
                    ended = true;
                    break;
                };
                let line = line.trim_end_matches('\r');
                if !line.trim().is_empty() {
                    answers.set(id.as_str(), line);
                } else if answers.answer(id).is_none() {
                    answers.set(id.as_str(), "");
                }

                saver.input(answers.clone());
                report_save_warning(&saver, out)?;
                writeln!(out, "{}", render::progress_bar(evaluator.completion(&answers)))?;
            }

            if ended {
                break false;
            }

            let missing = evaluator.missing_required(&answers);
            if missing.is_empty() {
                break true;
            }
            writeln!(
                out,
                "\nPlease complete all required questions: {}",
                missing.join(", ")
            )?;
            pending = missing;
        };

        if !submitted {
            saver.flush().await;
            report_save_warning(&saver, out)?;
            saver.shutdown().await;
            writeln!(out, "\nInput closed before submitting; your answers are saved.")?;
            return Ok(None);
        }

        let grade = grade_and_render(&evaluator, &answers, out);

        saver.flush().await;
        report_save_warning(&saver, out)?;
        saver.shutdown().await;

        grade.map(Some)
    }
}

fn grade_and_render<W: Write>(
    evaluator: &AnswerEvaluator,
    answers: &Submission,
    out: &mut W,
) -> Result<Grade> {
    let grade = evaluator.grade(answers)?;
    writeln!(out, "\n{}", render::result_message(&grade))?;
    writeln!(
        out,
        "{}",
        render::progress_bar(grade.scorecard.result.percentage)
    )?;
    Ok(grade)
}

fn report_save_warning<W: Write>(saver: &AutoSaver, out: &mut W) -> Result<()> {
    if let Some(e) = saver.take_warning() {
        writeln!(out, "Warning: could not save your progress ({e}). You can keep going.")?;
    }
    Ok(())
}
