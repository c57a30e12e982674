//! CLI integration tests using assert_cmd.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn quizkeep(dir: &Path) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("quizkeep").unwrap();
    cmd.current_dir(dir)
        .env("HOME", dir)
        .env_remove("QUIZKEEP_DATA_DIR")
        .env_remove("RUST_LOG");
    cmd
}

/// A temp dir with the starter config and answer key in it.
fn initialized() -> TempDir {
    let dir = TempDir::new().unwrap();
    quizkeep(dir.path()).arg("init").assert().success();
    dir
}

fn write_answers(dir: &Path, json: &str) -> std::path::PathBuf {
    let path = dir.join("answers.json");
    std::fs::write(&path, json).unwrap();
    path
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    quizkeep(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created quizkeep.toml"))
        .stdout(predicate::str::contains("Created answer-key.toml"));

    assert!(dir.path().join("quizkeep.toml").exists());
    assert!(dir.path().join("answer-key.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = initialized();

    // Second init should skip
    quizkeep(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn validate_starter_answer_key() {
    let dir = initialized();

    quizkeep(dir.path())
        .args(["validate", "--key", "answer-key.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("(2 questions)"))
        .stdout(predicate::str::contains("Answer key valid."));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("key.toml"),
        r#"
[answer_key]
id = "k"
name = "Warnings"

[[questions]]
id = "q1"
prompt = ""
accepted = ["roma", "Roma"]
"#,
    )
    .unwrap();

    quizkeep(dir.path())
        .args(["validate", "--key", "key.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[q1] WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    let dir = TempDir::new().unwrap();

    quizkeep(dir.path())
        .args(["validate", "--key", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn score_half_correct_fails_threshold() {
    let dir = initialized();
    let answers = write_answers(
        dir.path(),
        r#"{"question1": "durante el Imperio Romano", "question2": "no dice nada"}"#,
    );

    quizkeep(dir.path())
        .args(["score", "--key", "answer-key.toml", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "You scored 50.0%. Would you like to try again?",
        ));
}

#[test]
fn score_all_correct_passes() {
    let dir = initialized();
    let answers = write_answers(
        dir.path(),
        r#"{"question1": "Roma", "question2": "estaba en contra"}"#,
    );

    quizkeep(dir.path())
        .args(["score", "--key", "answer-key.toml", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Excellent! You scored 100.0% correct answers.",
        ))
        .stdout(predicate::str::contains("[####################] 100%"));
}

#[test]
fn score_fail_under_exits_nonzero() {
    let dir = initialized();
    let answers = write_answers(dir.path(), r#"{"question1": "Roma", "question2": ""}"#);

    quizkeep(dir.path())
        .args(["score", "--key", "answer-key.toml", "--fail-under", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("below the pass threshold"));
}

#[test]
fn score_threshold_flag_overrides_config() {
    let dir = initialized();
    let answers = write_answers(dir.path(), r#"{"question1": "Roma"}"#);

    quizkeep(dir.path())
        .args([
            "score",
            "--key",
            "answer-key.toml",
            "--threshold",
            "50",
            "--fail-under",
            "--answers",
        ])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("Excellent! You scored 50.0%"));
}

#[test]
fn score_json_format() {
    let dir = initialized();
    let answers = write_answers(dir.path(), r#"{"question1": "egipto", "question9": "x"}"#);

    let output = quizkeep(dir.path())
        .args(["score", "--key", "answer-key.toml", "--format", "json", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stderr(predicate::str::contains("unknown questions: question9"))
        .get_output()
        .stdout
        .clone();

    let grade: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(grade["scorecard"]["result"]["percentage"], 50.0);
    assert_eq!(grade["passing"], false);
}

#[test]
fn score_unknown_format_fails() {
    let dir = initialized();
    let answers = write_answers(dir.path(), r#"{}"#);

    quizkeep(dir.path())
        .args(["score", "--key", "answer-key.toml", "--format", "xml", "--answers"])
        .arg(&answers)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn progress_without_saved_answers() {
    let dir = initialized();

    quizkeep(dir.path())
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress."));
}

#[test]
fn take_saves_answers_for_progress() {
    let dir = initialized();

    quizkeep(dir.path())
        .arg("take")
        .write_stdin("Roma\nestaba en contra\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Excellent! You scored 100.0% correct answers.",
        ));

    assert!(dir.path().join(".quizkeep/history_progress.json").exists());

    quizkeep(dir.path())
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("question1: Roma"))
        .stdout(predicate::str::contains("Completion [####################] 100%"));
}

#[test]
fn take_resumes_after_closed_input() {
    let dir = initialized();

    quizkeep(dir.path())
        .arg("take")
        .write_stdin("egipto\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("your answers are saved"));

    quizkeep(dir.path())
        .arg("take")
        .write_stdin("\ncontra\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored saved answers"))
        .stdout(predicate::str::contains("saved answer: egipto"))
        .stdout(predicate::str::contains("100.0%"));
}

#[test]
fn progress_reports_corrupted_data() {
    let dir = initialized();
    std::fs::create_dir_all(dir.path().join(".quizkeep")).unwrap();
    std::fs::write(dir.path().join(".quizkeep/history_progress.json"), "{not json").unwrap();

    quizkeep(dir.path())
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains("corrupted"));
}

#[test]
fn progress_reports_non_utf8_data_as_corrupted() {
    let dir = initialized();
    std::fs::create_dir_all(dir.path().join(".quizkeep")).unwrap();
    std::fs::write(
        dir.path().join(".quizkeep/history_progress.json"),
        [0xff, 0xfe, b'{'],
    )
    .unwrap();

    quizkeep(dir.path())
        .arg("progress")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Saved progress is corrupted and will be ignored",
        ));
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();

    quizkeep(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("auto-saved progress"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();

    quizkeep(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("quizkeep"));
}
