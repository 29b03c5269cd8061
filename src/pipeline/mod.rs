//! Generation pipeline.
//!
//! - **Config**: credential, model, sampling profiles and the item lists
//! - **Runner**: the sequential single-turn then multi-turn driver
//!
//! # Example
//!
//! ```rust,ignore
//! use socratic_forge::pipeline::{DatasetGenerator, GeneratorConfig};
//!
//! let config = GeneratorConfig::from_env()?
//!     .with_output_path("data/interviewer_training_data.jsonl");
//!
//! let generator = DatasetGenerator::from_config(config);
//! let (report, summary) = generator.run_to_file().await?;
//!
//! println!("{} examples written to {}", report.total(), summary.path.display());
//! ```

pub mod config;
pub mod runner;

pub use config::{
    ConfigError, GeneratorConfig, API_BASE_ENV, API_KEY_ENV, DEFAULT_OUTPUT_PATH, MODEL_ENV,
    OUTPUT_ENV, TURNS_ENV,
};
pub use runner::{DatasetGenerator, GenerationReport, PhaseStats, RunError};
