//! CLI command definitions for socratic-forge.
//!
//! Running the binary with no subcommand behaves like `generate` with every
//! default applied.

use crate::export::read_jsonl;
use crate::llm::{DEFAULT_MODEL, GROQ_API_BASE};
use crate::pipeline::{
    ConfigError, DatasetGenerator, GeneratorConfig, PhaseStats, API_KEY_ENV, DEFAULT_OUTPUT_PATH,
};
use crate::socratic::{Conversation, DEFAULT_MULTI_TURN_TURNS};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Local environment files, in priority order.
const ENV_FILES: [&str; 2] = [".env.local", ".env"];

/// Socratic interviewer dataset generator.
#[derive(Parser)]
#[command(name = "socratic-forge")]
#[command(about = "Generate Socratic interviewer training dialogues with an LLM")]
#[command(version)]
#[command(
    long_about = "socratic-forge asks a chat-completion model to play a Socratic interviewer and \
                  writes the resulting dialogues as ShareGPT-style JSONL.\n\n\
                  Example usage:\n  socratic-forge generate --output data/interviewer_training_data.jsonl"
)]
pub struct Cli {
    /// The subcommand to execute. Defaults to `generate`.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Generate the single-turn and multi-turn dataset.
    #[command(alias = "gen")]
    Generate(GenerateArgs),

    /// Summarize an existing JSONL dataset.
    Inspect(InspectArgs),
}

/// Arguments for the generate command.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Output JSONL file. Replaced if it already exists.
    #[arg(short = 'o', long, env = "SOCRATIC_OUTPUT", default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// Model identifier.
    #[arg(short = 'm', long, env = "SOCRATIC_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible API.
    #[arg(long, env = "SOCRATIC_API_BASE", default_value = GROQ_API_BASE)]
    pub api_base: String,

    /// API key (can also be set via GROQ_API_KEY, .env.local or .env).
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Exchanges requested per multi-turn dialogue.
    #[arg(
        short = 't',
        long,
        env = "SOCRATIC_TURNS",
        default_value_t = DEFAULT_MULTI_TURN_TURNS
    )]
    pub turns: u32,

    /// Skip the single-turn phase.
    #[arg(long)]
    pub skip_single_turn: bool,

    /// Skip the multi-turn phase.
    #[arg(long)]
    pub skip_multi_turn: bool,

    /// Print the run summary as JSON instead of the banner.
    #[arg(short = 'j', long)]
    pub json: bool,
}

impl Default for GenerateArgs {
    fn default() -> Self {
        Self::parse_from(["generate"])
    }
}

/// Arguments for the inspect command.
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// JSONL dataset to read.
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    pub path: String,

    /// Print the summary as JSON.
    #[arg(short = 'j', long)]
    pub json: bool,
}

/// Parse CLI arguments and return the Cli struct.
///
/// Call [`load_env_files`] first so values from `.env.local` / `.env` reach
/// the `env`-backed flags.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Loads `.env.local` then `.env` and returns the files that were found.
///
/// Variables already present in the environment are never overridden, so
/// `.env.local` wins over `.env` and both lose to the real environment.
pub fn load_env_files() -> Vec<PathBuf> {
    ENV_FILES
        .iter()
        .filter_map(|file| dotenvy::from_filename(file).ok())
        .collect()
}

/// Run the CLI by loading environment files, parsing arguments and executing
/// the command.
pub async fn run() -> anyhow::Result<()> {
    for path in load_env_files() {
        debug!(path = %path.display(), "Loaded environment file");
    }
    run_with_cli(parse_cli()).await
}

/// Run the CLI with the parsed arguments.
pub async fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Generate(args)) => run_generate_command(args).await,
        Some(Commands::Inspect(args)) => run_inspect_command(args),
        None => run_generate_command(GenerateArgs::default()).await,
    }
}

// ============================================================================
// Generate Command Implementation
// ============================================================================

/// JSON output structure for a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOutput {
    /// "success" if at least one example was written, otherwise "empty".
    pub status: String,
    pub model: String,
    pub total_examples: usize,
    pub single_turn: PhaseStats,
    pub multi_turn: PhaseStats,
    pub output_file: String,
    pub file_size_bytes: u64,
    pub started_at: DateTime<Utc>,
    pub total_duration_ms: u64,
}

fn build_config(args: &GenerateArgs) -> Result<GeneratorConfig, ConfigError> {
    let api_key = args
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_ENV.to_string()))?;

    let config = GeneratorConfig::new(api_key)
        .with_model(args.model.clone())
        .with_api_base(args.api_base.clone())
        .with_output_path(&args.output)
        .with_multi_turn_turns(args.turns)
        .with_skip_single_turn(args.skip_single_turn)
        .with_skip_multi_turn(args.skip_multi_turn);

    config.validate()?;
    Ok(config)
}

async fn run_generate_command(args: GenerateArgs) -> anyhow::Result<()> {
    if !args.json {
        println!("{}", "=".repeat(60));
        println!("🎓 Socratic Interviewer Dataset Generator");
        println!("{}", "=".repeat(60));
        println!();
    }

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(ConfigError::MissingEnvVar(_)) if !args.json => {
            println!("❌ Error: {} environment variable not set", API_KEY_ENV);
            println!("   Add it to your .env.local file");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let generator = DatasetGenerator::from_config(config);
    let (report, summary) = generator.run_to_file().await?;

    let output = GenerationOutput {
        status: if report.total() == 0 {
            "empty".to_string()
        } else {
            "success".to_string()
        },
        model: args.model.clone(),
        total_examples: report.total(),
        single_turn: report.single_turn,
        multi_turn: report.multi_turn,
        output_file: summary.path.display().to_string(),
        file_size_bytes: summary.bytes,
        started_at: report.started_at,
        total_duration_ms: report.elapsed.as_millis() as u64,
    };

    if args.json {
        let json_output = serde_json::to_string_pretty(&output)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))?;
        println!("{}", json_output);
        return Ok(());
    }

    if report.total() == 0 {
        warn!("No examples were generated; the output file is empty.");
    }

    println!();
    println!("{}", "=".repeat(60));
    println!("✅ Dataset Generation Complete!");
    println!("{}", "=".repeat(60));
    println!("📊 Total examples: {}", output.total_examples);
    println!("📂 Output file: {}", output.output_file);
    println!("📏 File size: {:.2} KB", summary.kilobytes());
    println!();
    println!("Next steps:");
    println!("1. Review the dataset: cat {} | jq", output.output_file);
    println!("2. Upload to Google Colab");
    println!("3. Run the training notebook");
    println!();

    Ok(())
}

// ============================================================================
// Inspect Command Implementation
// ============================================================================

/// Summary of an existing dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetSummary {
    pub total: usize,
    pub single_turn: usize,
    pub multi_turn: usize,
    pub by_topic: BTreeMap<String, usize>,
}

impl DatasetSummary {
    pub fn from_records(records: &[Conversation]) -> Self {
        let mut by_topic = BTreeMap::new();
        for record in records {
            *by_topic.entry(record.topic().to_string()).or_insert(0) += 1;
        }
        let multi_turn = records.iter().filter(|r| r.is_multi_turn()).count();

        Self {
            total: records.len(),
            single_turn: records.len() - multi_turn,
            multi_turn,
            by_topic,
        }
    }
}

fn run_inspect_command(args: InspectArgs) -> anyhow::Result<()> {
    let path = Path::new(&args.path);
    let records = read_jsonl(path)?;
    let summary = DatasetSummary::from_records(&records);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    if summary.total == 0 {
        println!("No examples found in {}.", path.display());
        return Ok(());
    }

    println!("Loaded {} examples from {}", summary.total, path.display());
    println!("  Single-turn: {}", summary.single_turn);
    println!("  Multi-turn: {}", summary.multi_turn);
    println!("  By topic:");
    let mut topics: Vec<_> = summary.by_topic.iter().collect();
    topics.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (topic, count) in topics {
        println!("    {}: {}", topic, count);
    }

    Ok(())
}
