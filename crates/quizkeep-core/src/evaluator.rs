//! Answer matching and scoring.
//!
//! Everything here is pure: the same submission and key always give the
//! same score.

use crate::error::QuizError;
use crate::model::{AnswerKey, Grade, QuestionOutcome, ScoreResult, Scorecard, Submission};

/// Whether `user_answer` contains any of the `accepted` keywords.
///
/// Matching is case-insensitive and ignores surrounding whitespace in the
/// answer. A blank answer never matches.
pub fn matches<S: AsRef<str>>(user_answer: &str, accepted: &[S]) -> bool {
    let normalized = user_answer.trim().to_lowercase();
    if normalized.is_empty() {
        return false;
    }
    accepted
        .iter()
        .any(|keyword| normalized.contains(&keyword.as_ref().to_lowercase()))
}

/// Score a submission against the key.
///
/// Only questions in the key count; extra ids in the submission are
/// ignored and missing ones score as blank.
pub fn evaluate(submission: &Submission, key: &AnswerKey) -> Result<ScoreResult, QuizError> {
    evaluate_detailed(submission, key).map(|card| card.result)
}

/// Score a submission and keep the per-question breakdown.
pub fn evaluate_detailed(submission: &Submission, key: &AnswerKey) -> Result<Scorecard, QuizError> {
    if key.is_empty() {
        return Err(QuizError::invalid("answer key has no questions"));
    }

    let mut earned_points = 0.0;
    let mut max_points = 0.0;
    let mut questions = Vec::with_capacity(key.len());

    for (id, question) in key.questions() {
        max_points += question.points;
        let correct = submission
            .answer(id)
            .is_some_and(|answer| matches(answer, &question.accepted));
        if correct {
            earned_points += question.points;
        }
        questions.push(QuestionOutcome {
            id: id.to_string(),
            points: question.points,
            correct,
        });
    }

    if max_points <= 0.0 || !max_points.is_finite() {
        return Err(QuizError::invalid(format!(
            "answer key has no scorable points (max points {max_points})"
        )));
    }

    let percentage = (100.0 * earned_points / max_points).clamp(0.0, 100.0);

    Ok(Scorecard {
        result: ScoreResult {
            earned_points,
            max_points,
            percentage,
        },
        questions,
    })
}

/// Whether a score reaches the pass threshold (inclusive).
pub fn is_passing(result: &ScoreResult, threshold: f64) -> bool {
    result.percentage >= threshold
}

/// Required questions left blank, in question id order.
pub fn missing_required<'k>(submission: &Submission, key: &'k AnswerKey) -> Vec<&'k str> {
    key.questions()
        .filter(|(_, q)| q.required)
        .filter(|(id, _)| is_blank(submission.answer(id)))
        .map(|(id, _)| id)
        .collect()
}

/// Share of required questions answered, as a percentage.
///
/// A key without required questions is always complete.
pub fn completion(submission: &Submission, key: &AnswerKey) -> f64 {
    let required: Vec<&str> = key
        .questions()
        .filter(|(_, q)| q.required)
        .map(|(id, _)| id)
        .collect();
    if required.is_empty() {
        return 100.0;
    }
    let answered = required
        .iter()
        .filter(|id| !is_blank(submission.answer(id)))
        .count();
    100.0 * answered as f64 / required.len() as f64
}

fn is_blank(answer: Option<&str>) -> bool {
    answer.is_none_or(|a| a.trim().is_empty())
}

/// Scores submissions against one answer key and pass threshold.
///
/// Built once at startup and handed to whatever drives the quiz.
#[derive(Debug, Clone)]
pub struct AnswerEvaluator {
    key: AnswerKey,
    threshold: f64,
}

impl AnswerEvaluator {
    pub fn new(key: AnswerKey, threshold: f64) -> Self {
        Self { key, threshold }
    }

    pub fn key(&self) -> &AnswerKey {
        &self.key
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a submission and judge it against the threshold.
    pub fn grade(&self, submission: &Submission) -> Result<Grade, QuizError> {
        let scorecard = evaluate_detailed(submission, &self.key)?;
        let passing = is_passing(&scorecard.result, self.threshold);
        tracing::debug!(
            earned = scorecard.result.earned_points,
            max = scorecard.result.max_points,
            passing,
            "graded submission"
        );
        Ok(Grade {
            scorecard,
            threshold: self.threshold,
            passing,
        })
    }

    pub fn missing_required(&self, submission: &Submission) -> Vec<String> {
        missing_required(submission, &self.key)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn completion(&self, submission: &Submission) -> f64 {
        completion(submission, &self.key)
    }
}
