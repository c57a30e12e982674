//! quizkeep CLI — take quizzes with auto-saved progress and score answer files.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;
mod shell;

#[derive(Parser)]
#[command(
    name = "quizkeep",
    version,
    about = "Take and score quizzes with auto-saved progress"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively, saving answers as you go
    Take {
        /// Answer key TOML (defaults to the configured answer_key)
        #[arg(long)]
        key: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Score a JSON answers file against an answer key
    Score {
        /// Answer key TOML
        #[arg(long)]
        key: PathBuf,

        /// JSON object mapping question ids to answers
        #[arg(long)]
        answers: PathBuf,

        /// Pass threshold in percent (defaults to the configured pass_threshold)
        #[arg(long)]
        threshold: Option<f64>,

        /// Exit code 1 if the score is below the threshold
        #[arg(long)]
        fail_under: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate an answer key TOML file
    Validate {
        /// Path to the answer key
        #[arg(long)]
        key: PathBuf,
    },

    /// Show saved in-progress answers
    Progress {
        /// Answer key used to compute completion
        #[arg(long)]
        key: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example answer key
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizkeep=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Take { key, config } => commands::take::execute(key, config).await,
        Commands::Score {
            key,
            answers,
            threshold,
            fail_under,
            format,
            config,
        } => commands::score::execute(key, answers, threshold, fail_under, format, config),
        Commands::Validate { key } => commands::validate::execute(key),
        Commands::Progress { key, config } => commands::progress::execute(key, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
