//! TOML answer key parser.
//!
//! Loads answer keys and JSON submissions from disk, and validates keys for
//! issues that are legal but probably unintended.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{AnswerKey, Question, Submission};

/// Intermediate TOML structure for parsing answer key files.
#[derive(Debug, Deserialize)]
struct TomlAnswerKeyFile {
    answer_key: TomlAnswerKeyHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlAnswerKeyHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    id: String,
    #[serde(default)]
    prompt: String,
    accepted: Vec<String>,
    #[serde(default = "default_points")]
    points: f64,
    #[serde(default = "default_true")]
    required: bool,
}

fn default_points() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Parse a single TOML file into an `AnswerKey`.
pub fn parse_answer_key(path: &Path) -> Result<AnswerKey> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answer key file: {}", path.display()))?;

    parse_answer_key_str(&content, path)
}

/// Parse a TOML string into an `AnswerKey` (useful for testing).
pub fn parse_answer_key_str(content: &str, source_path: &Path) -> Result<AnswerKey> {
    let parsed: TomlAnswerKeyFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let questions = parsed.questions.into_iter().map(|q| {
        (
            q.id,
            Question {
                prompt: q.prompt,
                accepted: q.accepted,
                points: q.points,
                required: q.required,
            },
        )
    });

    let key = AnswerKey::new(parsed.answer_key.id, parsed.answer_key.name, questions)
        .with_context(|| format!("invalid answer key: {}", source_path.display()))?
        .with_description(parsed.answer_key.description);

    Ok(key)
}

/// Load a JSON submission (`{"question id": "answer"}`) from a file.
pub fn load_submission(path: &Path) -> Result<Submission> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read answers file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse answers JSON: {}", path.display()))
}

/// A warning from answer key validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question ID (if applicable).
    pub question_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate an answer key for common issues.
pub fn validate_answer_key(key: &AnswerKey) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if key.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "answer key has no questions; every submission will be rejected".into(),
        });
    }

    for (id, question) in key.questions() {
        if question.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(id.to_string()),
                message: "prompt is empty".into(),
            });
        }

        // Matching lower-cases both sides, so "Roma" and "roma" are the same keyword
        let mut seen = HashSet::new();
        for keyword in &question.accepted {
            if !seen.insert(keyword.to_lowercase()) {
                warnings.push(ValidationWarning {
                    question_id: Some(id.to_string()),
                    message: format!("duplicate accepted answer: {keyword}"),
                });
            }
        }

        for keyword in &question.accepted {
            if keyword.trim() != keyword {
                warnings.push(ValidationWarning {
                    question_id: Some(id.to_string()),
                    message: format!(
                        "accepted answer '{keyword}' is matched together with its surrounding whitespace"
                    ),
                });
            }
        }

        let lowered: Vec<String> = question.accepted.iter().map(|a| a.to_lowercase()).collect();
        for (i, short) in lowered.iter().enumerate() {
            for (j, long) in lowered.iter().enumerate() {
                if i != j && short != long && long.contains(short.as_str()) {
                    warnings.push(ValidationWarning {
                        question_id: Some(id.to_string()),
                        message: format!(
                            "accepted answer '{}' is redundant: it contains '{}'",
                            question.accepted[j], question.accepted[i]
                        ),
                    });
                }
            }
        }
    }

    if !key.is_empty() && key.questions().all(|(_, q)| !q.required) {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "no question is required; an empty quiz can be submitted".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[answer_key]
id = "history"
name = "History of contraception"
description = "Two open questions"

[[questions]]
id = "question1"
prompt = "Which ancient civilisations left records of contraceptive methods?"
accepted = ["antigua", "egipto", "grecia", "roma"]
points = 1

[[questions]]
id = "question2"
prompt = "What was the medieval church's position?"
accepted = ["prohibía", "desaprobaba", "contra"]
points = 2.5
"#;

    #[test]
    fn parse_valid_toml() {
        let key = parse_answer_key_str(VALID_TOML, &PathBuf::from("key.toml")).unwrap();
        assert_eq!(key.id, "history");
        assert_eq!(key.name, "History of contraception");
        assert_eq!(key.description, "Two open questions");
        assert_eq!(key.len(), 2);
        let q1 = key.get("question1").unwrap();
        assert_eq!(q1.accepted.len(), 4);
        assert_eq!(q1.points, 1.0);
        assert!(q1.required);
        assert_eq!(key.get("question2").unwrap().points, 2.5);
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[answer_key]
id = "minimal"
name = "Minimal"

[[questions]]
id = "q1"
accepted = ["roma"]
"#;
        let key = parse_answer_key_str(toml, &PathBuf::from("key.toml")).unwrap();
        let q1 = key.get("q1").unwrap();
        assert_eq!(q1.points, 1.0);
        assert!(q1.required);
        assert!(q1.prompt.is_empty());
        assert!(key.description.is_empty());
    }

    #[test]
    fn parse_rejects_zero_points() {
        let toml = r#"
[answer_key]
id = "bad"
name = "Bad"

[[questions]]
id = "q1"
accepted = ["roma"]
points = 0
"#;
        let err = parse_answer_key_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("invalid configuration"));
    }

    #[test]
    fn parse_rejects_duplicate_ids() {
        let toml = r#"
[answer_key]
id = "dupes"
name = "Dupes"

[[questions]]
id = "same"
accepted = ["a"]

[[questions]]
id = "same"
accepted = ["b"]
"#;
        let err = parse_answer_key_str(toml, &PathBuf::from("dupes.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate question id"));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_answer_key_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn validate_clean_key_has_no_warnings() {
        let key = parse_answer_key_str(VALID_TOML, &PathBuf::from("key.toml")).unwrap();
        assert!(validate_answer_key(&key).is_empty());
    }

    #[test]
    fn validate_empty_key() {
        let toml = r#"
[answer_key]
id = "empty"
name = "Empty"
"#;
        let key = parse_answer_key_str(toml, &PathBuf::from("empty.toml")).unwrap();
        let warnings = validate_answer_key(&key);
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
    }

    #[test]
    fn validate_flags_redundant_and_duplicate_keywords() {
        let toml = r#"
[answer_key]
id = "k"
name = "K"

[[questions]]
id = "q1"
prompt = "Where?"
accepted = ["Roma", "roma", "romano"]
"#;
        let key = parse_answer_key_str(toml, &PathBuf::from("k.toml")).unwrap();
        let warnings = validate_answer_key(&key);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("redundant")));
        assert!(warnings
            .iter()
            .all(|w| w.question_id.as_deref() == Some("q1")));
    }

    #[test]
    fn validate_flags_all_optional() {
        let toml = r#"
[answer_key]
id = "k"
name = "K"

[[questions]]
id = "q1"
prompt = "Anything?"
accepted = ["x"]
required = false
"#;
        let key = parse_answer_key_str(toml, &PathBuf::from("k.toml")).unwrap();
        let warnings = validate_answer_key(&key);
        assert!(warnings.iter().any(|w| w.message.contains("no question is required")));
    }

    #[test]
    fn load_answer_key_and_submission_files() {
        let dir = tempfile::tempdir().unwrap();
        let key_path = dir.path().join("key.toml");
        std::fs::write(&key_path, VALID_TOML).unwrap();
        let answers_path = dir.path().join("answers.json");
        std::fs::write(&answers_path, r#"{"question1": "Roma", "question2": ""}"#).unwrap();

        let key = parse_answer_key(&key_path).unwrap();
        assert_eq!(key.len(), 2);
        let submission = load_submission(&answers_path).unwrap();
        assert_eq!(submission.answer("question1"), Some("Roma"));
    }

    #[test]
    fn load_missing_file_has_context() {
        let err = parse_answer_key(&PathBuf::from("does-not-exist.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read answer key file"));
    }
}
