//! Command-line interface for socratic-forge.
//!
//! Provides the `generate` and `inspect` commands.

mod commands;

pub use commands::{load_env_files, parse_cli, run, run_with_cli, Cli, Commands, DatasetSummary};
