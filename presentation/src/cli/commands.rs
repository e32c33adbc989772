//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for answers
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Only the translated answer
    Answer,
    /// Answer with detected language, retrieval and prompt details
    Detailed,
    /// JSON output
    Json,
}

impl From<OutputFormat> for lingua_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Answer => lingua_domain::OutputFormat::Answer,
            OutputFormat::Detailed => lingua_domain::OutputFormat::Detailed,
            OutputFormat::Json => lingua_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for lingua-qa
#[derive(Parser, Debug)]
#[command(name = "lingua-qa")]
#[command(author, version, about = "Multilingual question answering - ask in any language, read the answer in yours")]
#[command(long_about = r#"
lingua-qa answers a question asked in any language.

Each question goes through five stages:
1. Detect the question's language
2. Translate it to English for retrieval
3. Look up background on Wikipedia
4. Ask the model (Gemini) for a short answer
5. Translate the answer into the output language

The model key is read from GOOGLE_API_KEY unless configured otherwise.

Configuration files are loaded from (in priority order):
1. LINGUA_* environment variables   (e.g. LINGUA_GENERATION__MODEL)
2. --config <path>                   Explicit config file
3. ./lingua.toml                     Project-level config
4. ~/.config/lingua-qa/config.toml   Global config

Example:
  lingua-qa "¿Cuál es la capital de Francia?"
  lingua-qa -l hi "What is photosynthesis?"
  lingua-qa --chat -l Japanese
"#)]
pub struct Cli {
    /// The question to ask (not required in chat mode)
    pub question: Option<String>,

    /// Output language, as a code ("hi") or a name ("Hindi")
    #[arg(short, long, value_name = "LANG")]
    pub lang: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// List the supported output languages and exit
    #[arg(long)]
    pub list_languages: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Per-question timeout in seconds (0 disables it)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
