//! The `quizkeep init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizkeep.toml
    if std::path::Path::new("quizkeep.toml").exists() {
        println!("quizkeep.toml already exists, skipping.");
    } else {
        std::fs::write("quizkeep.toml", SAMPLE_CONFIG)?;
        println!("Created quizkeep.toml");
    }

    // Create example answer key
    let key_path = std::path::Path::new("answer-key.toml");
    if key_path.exists() {
        println!("answer-key.toml already exists, skipping.");
    } else {
        std::fs::write(key_path, EXAMPLE_ANSWER_KEY)?;
        println!("Created answer-key.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit answer-key.toml with your questions");
    println!("  2. Run: quizkeep validate --key answer-key.toml");
    println!("  3. Run: quizkeep take");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkeep configuration

# Key under which in-progress answers are saved
storage_key = "history_progress"
# Directory holding saved progress
data_dir = ".quizkeep"
# Answer key used by `quizkeep take` and `quizkeep progress`
answer_key = "answer-key.toml"
# Save answers once typing has paused for this long
auto_save_delay_ms = 500
# Minimum percentage for a passing grade
pass_threshold = 70.0
"#;

const EXAMPLE_ANSWER_KEY: &str = r#"[answer_key]
id = "historia-anticonceptivos"
name = "Historia de los anticonceptivos"
description = "Responde con tus propias palabras; se aceptan respuestas que contengan las palabras clave."

[[questions]]
id = "question1"
prompt = "¿En qué civilizaciones antiguas se documentan los primeros métodos anticonceptivos?"
accepted = ["antigua", "egipto", "grecia", "roma"]
points = 1.0

[[questions]]
id = "question2"
prompt = "¿Cuál era la postura de la Iglesia medieval sobre la anticoncepción?"
accepted = ["prohibía", "desaprobaba", "contra"]
points = 1.0
"#;
