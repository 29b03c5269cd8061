//! Configuration for the dataset generator.
//!
//! The credential and every other setting are carried as explicit values;
//! only [`GeneratorConfig::from_env`] touches the process environment.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

use crate::llm::{GenerationProfile, DEFAULT_MODEL, GROQ_API_BASE};
use crate::socratic::{multi_turn_topics, scenarios, Scenario, DEFAULT_MULTI_TURN_TURNS};

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

pub const API_BASE_ENV: &str = "SOCRATIC_API_BASE";
pub const MODEL_ENV: &str = "SOCRATIC_MODEL";
pub const OUTPUT_ENV: &str = "SOCRATIC_OUTPUT";
pub const TURNS_ENV: &str = "SOCRATIC_TURNS";

/// Default dataset location, relative to the working directory.
pub const DEFAULT_OUTPUT_PATH: &str = "data/interviewer_training_data.jsonl";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    /// Configuration validation failed.
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

/// Configuration for a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    // LLM settings
    /// Credential for the completion service.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API.
    pub api_base: String,
    /// Model identifier.
    pub model: String,

    // Generation settings
    /// Sampling and pacing for single-turn calls.
    pub single_turn: GenerationProfile,
    /// Sampling and pacing for multi-turn calls.
    pub multi_turn: GenerationProfile,
    /// Number of exchanges requested per multi-turn dialogue.
    pub multi_turn_turns: u32,
    /// Scenarios for the single-turn phase, in order.
    pub scenarios: Vec<Scenario>,
    /// Topics for the multi-turn phase, in order.
    pub multi_turn_topics: Vec<String>,
    /// Skip the single-turn phase.
    pub skip_single_turn: bool,
    /// Skip the multi-turn phase.
    pub skip_multi_turn: bool,

    // Output
    /// Destination JSONL file.
    pub output_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: GROQ_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),

            single_turn: GenerationProfile::single_turn(),
            multi_turn: GenerationProfile::multi_turn(),
            multi_turn_turns: DEFAULT_MULTI_TURN_TURNS,
            scenarios: scenarios(),
            multi_turn_topics: multi_turn_topics(),
            skip_single_turn: false,
            skip_multi_turn: false,

            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl GeneratorConfig {
    /// Creates a configuration with default values and the given credential.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Creates configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GROQ_API_KEY`: API credential (required)
    /// - `SOCRATIC_API_BASE`: OpenAI-compatible base URL (default: Groq)
    /// - `SOCRATIC_MODEL`: Model identifier (default: llama-3.3-70b-versatile)
    /// - `SOCRATIC_OUTPUT`: Output file (default: data/interviewer_training_data.jsonl)
    /// - `SOCRATIC_TURNS`: Turns per multi-turn dialogue (default: 3)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the credential is missing or a value is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key =
            lookup(API_KEY_ENV).ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_ENV.to_string()))?;
        let mut config = Self::new(api_key);

        if let Some(val) = lookup(API_BASE_ENV) {
            config.api_base = val;
        }

        if let Some(val) = lookup(MODEL_ENV) {
            config.model = val;
        }

        if let Some(val) = lookup(OUTPUT_ENV) {
            config.output_path = PathBuf::from(val);
        }

        if let Some(val) = lookup(TURNS_ENV) {
            config.multi_turn_turns = parse_env_value(&val, TURNS_ENV)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API base URL.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Sets the output file.
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Sets the number of turns per multi-turn dialogue.
    pub fn with_multi_turn_turns(mut self, turns: u32) -> Self {
        self.multi_turn_turns = turns;
        self
    }

    /// Replaces the single-turn scenarios.
    pub fn with_scenarios(mut self, scenarios: Vec<Scenario>) -> Self {
        self.scenarios = scenarios;
        self
    }

    /// Replaces the multi-turn topics.
    pub fn with_multi_turn_topics(mut self, topics: Vec<String>) -> Self {
        self.multi_turn_topics = topics;
        self
    }

    /// Sets the pause after every call in both phases.
    pub fn with_pacing(mut self, single_turn: Duration, multi_turn: Duration) -> Self {
        self.single_turn = self.single_turn.with_pacing(single_turn);
        self.multi_turn = self.multi_turn.with_pacing(multi_turn);
        self
    }

    /// Enables or disables the single-turn phase.
    pub fn with_skip_single_turn(mut self, skip: bool) -> Self {
        self.skip_single_turn = skip;
        self
    }

    /// Enables or disables the multi-turn phase.
    pub fn with_skip_multi_turn(mut self, skip: bool) -> Self {
        self.skip_multi_turn = skip;
        self
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ValidationFailed` if any values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::MissingEnvVar(API_KEY_ENV.to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "model cannot be empty".to_string(),
            ));
        }

        if self.api_base.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "api_base cannot be empty".to_string(),
            ));
        }

        if self.multi_turn_turns == 0 {
            return Err(ConfigError::ValidationFailed(
                "multi_turn_turns must be greater than 0".to_string(),
            ));
        }

        let profiles = [
            ("single_turn", &self.single_turn),
            ("multi_turn", &self.multi_turn),
        ];
        for (name, profile) in profiles {
            if !profile.temperature.is_finite() || !(0.0..=2.0).contains(&profile.temperature) {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} temperature must be between 0.0 and 2.0"
                )));
            }
            if profile.max_tokens == 0 {
                return Err(ConfigError::ValidationFailed(format!(
                    "{name} max_tokens must be greater than 0"
                )));
            }
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "output_path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parses an environment variable value.
fn parse_env_value<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::InvalidValue {
        key: key.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::new("gsk-test");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.api_base, "https://api.groq.com/openai/v1");
        assert_eq!(config.output_path, PathBuf::from("data/interviewer_training_data.jsonl"));
        assert_eq!(config.multi_turn_turns, 3);
        assert_eq!(config.scenarios.len(), 32);
        assert_eq!(config.multi_turn_topics.len(), 10);
        assert!(!config.skip_single_turn && !config.skip_multi_turn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_key_fails_validation() {
        let err = GeneratorConfig::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "GROQ_API_KEY"));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        assert!(GeneratorConfig::new("k").with_model(" ").validate().is_err());
        assert!(GeneratorConfig::new("k")
            .with_multi_turn_turns(0)
            .validate()
            .is_err());
        assert!(GeneratorConfig::new("k").with_output_path("").validate().is_err());

        let mut config = GeneratorConfig::new("k");
        config.single_turn = config.single_turn.with_temperature(f64::NAN);
        assert!(config.validate().is_err());

        let mut config = GeneratorConfig::new("k");
        config.multi_turn = config.multi_turn.with_max_tokens(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_pacing() {
        let config =
            GeneratorConfig::new("k").with_pacing(Duration::ZERO, Duration::from_millis(5));
        assert_eq!(config.single_turn.pacing, Duration::ZERO);
        assert_eq!(config.multi_turn.pacing, Duration::from_millis(5));
        assert_eq!(config.single_turn.max_tokens, 150);
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: std::collections::HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_requires_key() {
        let err = GeneratorConfig::from_lookup(vars(&[("SOCRATIC_TURNS", "4")])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "GROQ_API_KEY"));
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = GeneratorConfig::from_lookup(vars(&[
            ("GROQ_API_KEY", "gsk-test"),
            ("SOCRATIC_API_BASE", "http://localhost:4000/v1"),
            ("SOCRATIC_MODEL", "llama-3.1-8b-instant"),
            ("SOCRATIC_OUTPUT", "out/run.jsonl"),
            ("SOCRATIC_TURNS", " 5 "),
        ]))
        .expect("should build");

        assert_eq!(config.api_key, "gsk-test");
        assert_eq!(config.api_base, "http://localhost:4000/v1");
        assert_eq!(config.model, "llama-3.1-8b-instant");
        assert_eq!(config.output_path, PathBuf::from("out/run.jsonl"));
        assert_eq!(config.multi_turn_turns, 5);
    }

    #[test]
    fn test_from_lookup_rejects_bad_turns() {
        let lookup = vars(&[("GROQ_API_KEY", "k"), ("SOCRATIC_TURNS", "three")]);
        assert!(matches!(
            GeneratorConfig::from_lookup(lookup),
            Err(ConfigError::InvalidValue { .. })
        ));

        let lookup = vars(&[("GROQ_API_KEY", "k"), ("SOCRATIC_TURNS", "0")]);
        assert!(matches!(
            GeneratorConfig::from_lookup(lookup),
            Err(ConfigError::ValidationFailed(_))
        ));
    }

    #[test]
    fn test_parse_env_value() {
        let turns: u32 = parse_env_value(" 5 ", "SOCRATIC_TURNS").expect("should parse");
        assert_eq!(turns, 5);

        let err = parse_env_value::<u32>("many", "SOCRATIC_TURNS").unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue { ref key, .. } if key == "SOCRATIC_TURNS")
        );
    }
}
