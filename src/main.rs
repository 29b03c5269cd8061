//! socratic-forge CLI entry point.
//!
//! Initializes logging and delegates to the CLI module for command handling.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Before parsing, so .env values reach env-backed flags and RUST_LOG
    let env_files = socratic_forge::cli::load_env_files();
    let cli = socratic_forge::cli::parse_cli();

    // Priority: RUST_LOG env var > --log-level CLI arg > default "info"
    let log_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| cli.log_level.clone());

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)))
        .init();

    for path in env_files {
        tracing::debug!(path = %path.display(), "Loaded environment file");
    }

    socratic_forge::cli::run_with_cli(cli).await
}
