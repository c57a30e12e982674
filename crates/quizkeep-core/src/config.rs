//! quizkeep configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "history_progress";
/// Quiet window before an auto-save fires, in milliseconds.
pub const DEFAULT_AUTO_SAVE_DELAY_MS: u64 = 500;
/// Minimum percentage for a passing grade.
pub const DEFAULT_PASS_THRESHOLD: f64 = 70.0;

/// Whether `key` can name a saved snapshot: `[A-Za-z0-9_.-]`, not empty and
/// not starting with `.`.
pub fn is_valid_storage_key(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Top-level quizkeep configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizConfig {
    /// Key under which in-progress answers are saved.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Quiet window before in-progress answers are saved.
    #[serde(default = "default_auto_save_delay_ms")]
    pub auto_save_delay_ms: u64,
    /// Minimum percentage for a passing grade.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: f64,
    /// Directory holding saved progress.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Answer key used when none is given on the command line.
    #[serde(default = "default_answer_key")]
    pub answer_key: PathBuf,
    /// Largest snapshot the store accepts, in bytes (None = no limit).
    #[serde(default)]
    pub max_value_bytes: Option<usize>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}
fn default_auto_save_delay_ms() -> u64 {
    DEFAULT_AUTO_SAVE_DELAY_MS
}
fn default_pass_threshold() -> f64 {
    DEFAULT_PASS_THRESHOLD
}
fn default_data_dir() -> PathBuf {
    PathBuf::from(".quizkeep")
}
fn default_answer_key() -> PathBuf {
    PathBuf::from("answer-key.toml")
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            auto_save_delay_ms: default_auto_save_delay_ms(),
            pass_threshold: default_pass_threshold(),
            data_dir: default_data_dir(),
            answer_key: default_answer_key(),
            max_value_bytes: None,
        }
    }
}

impl QuizConfig {
    pub fn auto_save_delay(&self) -> Duration {
        Duration::from_millis(self.auto_save_delay_ms)
    }

    /// Reject values that would make scoring or saving meaningless.
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(
            (0.0..=100.0).contains(&self.pass_threshold),
            "pass_threshold must be between 0 and 100, got {}",
            self.pass_threshold
        );
        anyhow::ensure!(
            self.auto_save_delay_ms > 0,
            "auto_save_delay_ms must be greater than 0"
        );
        anyhow::ensure!(
            is_valid_storage_key(&self.storage_key),
            "storage_key {:?} must be non-empty, use only letters, digits, '_', '-' or '.', \
             and not start with '.'",
            self.storage_key
        );
        Ok(())
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted as-is and never scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizkeep.toml` in the current directory
/// 2. `~/.config/quizkeep/config.toml`
///
/// Environment variable override: `QUIZKEEP_DATA_DIR`.
pub fn load_config() -> Result<QuizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkeep.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizConfig::default(),
    };

    if let Ok(dir) = std::env::var("QUIZKEEP_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.answer_key = resolve_path(&config.answer_key);

    config.validate()?;
    Ok(config)
}

/// Parse a TOML config string without touching the environment.
pub fn parse_config_str(content: &str) -> Result<QuizConfig> {
    Ok(toml::from_str::<QuizConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkeep"))
}
