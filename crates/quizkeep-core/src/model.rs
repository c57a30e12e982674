//! Core data model types for quizkeep.
//!
//! An [`AnswerKey`] is static configuration loaded once at startup. A
//! [`Submission`] is whatever the user typed, rebuilt on every input event.
//! Scores are derived and never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// One entry of an answer key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Text shown to the user.
    #[serde(default)]
    pub prompt: String,
    /// Keywords that make an answer correct when they appear in it.
    pub accepted: Vec<String>,
    /// Points awarded for a correct answer.
    #[serde(default = "default_points")]
    pub points: f64,
    /// Whether the quiz can be submitted with this question left blank.
    #[serde(default = "default_true")]
    pub required: bool,
}

fn default_points() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

impl Question {
    /// Create a required question worth `points`.
    pub fn new(prompt: impl Into<String>, accepted: &[&str], points: f64) -> Self {
        Self {
            prompt: prompt.into(),
            accepted: accepted.iter().map(|a| (*a).to_string()).collect(),
            points,
            required: true,
        }
    }

    /// Mark the question as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    fn check(&self, id: &str) -> Result<(), QuizError> {
        if !self.points.is_finite() || self.points <= 0.0 {
            return Err(QuizError::invalid(format!(
                "question '{id}' must be worth a positive number of points, got {}",
                self.points
            )));
        }
        if self.accepted.is_empty() {
            return Err(QuizError::invalid(format!(
                "question '{id}' has no accepted answers"
            )));
        }
        if self.accepted.iter().any(|a| a.trim().is_empty()) {
            return Err(QuizError::invalid(format!(
                "question '{id}' has a blank accepted answer"
            )));
        }
        Ok(())
    }
}

/// Question id → accepted answers and point value.
///
/// Questions are kept sorted by id so every walk over the key (scoring,
/// prompting, reporting) sees the same order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerKey {
    pub id: String,
    pub name: String,
    pub description: String,
    questions: BTreeMap<String, Question>,
}

impl AnswerKey {
    /// Build an answer key, checking every question.
    ///
    /// An empty key is accepted here; scoring against it fails instead.
    pub fn new<I>(id: impl Into<String>, name: impl Into<String>, questions: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = (String, Question)>,
    {
        let mut map = BTreeMap::new();
        for (qid, question) in questions {
            if qid.trim().is_empty() {
                return Err(QuizError::invalid("question id cannot be empty"));
            }
            question.check(&qid)?;
            if map.insert(qid.clone(), question).is_some() {
                return Err(QuizError::invalid(format!("duplicate question id: {qid}")));
            }
        }
        Ok(Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            questions: map,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn get(&self, id: &str) -> Option<&Question> {
        self.questions.get(id)
    }

    /// Questions in id order.
    pub fn questions(&self) -> impl Iterator<Item = (&str, &Question)> {
        self.questions.iter().map(|(id, q)| (id.as_str(), q))
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// The user's answers, question id → free text.
///
/// Serialized as a flat JSON object, which is also the persisted snapshot
/// format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, String>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(&self, question_id: &str) -> Option<&str> {
        self.0.get(question_id).map(String::as_str)
    }

    /// Record an answer, replacing any earlier one for the same question.
    pub fn set(&mut self, question_id: impl Into<String>, answer: impl Into<String>) {
        self.0.insert(question_id.into(), answer.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Submission
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<BTreeMap<String, String>> for Submission {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

/// Points earned against points available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub earned_points: f64,
    pub max_points: f64,
    /// `100 * earned_points / max_points`.
    pub percentage: f64,
}

/// How a single question was scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub id: String,
    pub points: f64,
    pub correct: bool,
}

/// A score together with its per-question breakdown (in question id order).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scorecard {
    pub result: ScoreResult,
    pub questions: Vec<QuestionOutcome>,
}

/// A scorecard judged against a pass threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub scorecard: Scorecard,
    pub threshold: f64,
    pub passing: bool,
}
