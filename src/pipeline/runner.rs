//! Dataset generator: drives scenarios and topics through the model.
//!
//! Two sequential phases, no parallelism:
//!
//! 1. Single-turn: every scenario in catalog order.
//! 2. Multi-turn: every topic in list order.
//!
//! A failed item is logged and dropped; the loop always runs to the end.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::{ExportError, GenerationError};
use crate::export::{JsonlWriter, WriteSummary};
use crate::llm::{CompletionClient, LiteLlmClient};
use crate::socratic::{
    build_multi_turn_prompt, build_single_turn_prompt, interpret_multi_turn,
    interpret_single_turn, Conversation, Scenario,
};

use super::config::{ConfigError, GeneratorConfig};

/// Errors that abort a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    /// Configuration is unusable; raised before any network call.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The dataset could not be written.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

/// Attempt and success counts for one phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PhaseStats {
    pub attempted: usize,
    pub succeeded: usize,
}

impl PhaseStats {
    pub fn failed(&self) -> usize {
        self.attempted - self.succeeded
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Successful records, single-turn first, in generation order.
    pub conversations: Vec<Conversation>,
    pub single_turn: PhaseStats,
    pub multi_turn: PhaseStats,
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
}

impl GenerationReport {
    pub fn total(&self) -> usize {
        self.conversations.len()
    }
}

/// Sequential driver for the whole pipeline.
pub struct DatasetGenerator {
    client: CompletionClient,
    config: GeneratorConfig,
}

impl std::fmt::Debug for DatasetGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetGenerator")
            .field("model", &self.client.model())
            .field("scenarios", &self.config.scenarios.len())
            .field("multi_turn_topics", &self.config.multi_turn_topics.len())
            .finish_non_exhaustive()
    }
}

impl DatasetGenerator {
    /// Creates a generator with an explicit completion client.
    pub fn new(client: CompletionClient, config: GeneratorConfig) -> Self {
        Self { client, config }
    }

    /// Creates a generator talking to the configured OpenAI-compatible API.
    pub fn from_config(config: GeneratorConfig) -> Self {
        let provider = LiteLlmClient::new(config.api_base.clone(), Some(config.api_key.clone()));
        let client = CompletionClient::new(Arc::new(provider), config.model.clone());
        Self::new(client, config)
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates one single-turn record for a scenario.
    pub async fn generate_single_turn(
        &self,
        scenario: &Scenario,
    ) -> Result<Conversation, GenerationError> {
        debug!(
            topic = %scenario.topic,
            stimulus = scenario.stimulus.kind(),
            "Requesting Socratic reply"
        );
        let messages = build_single_turn_prompt(scenario).into_messages();
        let raw = self
            .client
            .complete(messages, &self.config.single_turn)
            .await?;
        let reply = interpret_single_turn(&raw);
        Ok(Conversation::single_turn(scenario, reply))
    }

    /// Generates one multi-turn record for a topic.
    pub async fn generate_multi_turn(
        &self,
        topic: &str,
        turns: u32,
    ) -> Result<Conversation, GenerationError> {
        let messages = build_multi_turn_prompt(topic, turns).into_messages();
        let raw = self
            .client
            .complete(messages, &self.config.multi_turn)
            .await?;
        let parsed = interpret_multi_turn(&raw)?;
        Conversation::multi_turn(topic, parsed)
    }

    /// Runs both phases and collects the successful records.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` before any request if the configuration is
    /// invalid (most commonly a missing credential). Per-item failures are
    /// never returned; they only lower the success counts.
    pub async fn run(&self) -> Result<GenerationReport, ConfigError> {
        self.config.validate()?;

        let started_at = Utc::now();
        let start = Instant::now();
        let mut conversations = Vec::new();

        let mut single_turn = PhaseStats::default();
        if self.config.skip_single_turn {
            info!("Skipping single-turn phase");
        } else {
            let total = self.config.scenarios.len();
            info!(count = total, "Generating single-turn conversations");

            for (i, scenario) in self.config.scenarios.iter().enumerate() {
                single_turn.attempted += 1;
                match self.generate_single_turn(scenario).await {
                    Ok(conversation) => {
                        info!("[{}/{}] {} ✅", i + 1, total, scenario.topic);
                        conversations.push(conversation);
                        single_turn.succeeded += 1;
                    }
                    Err(e) => {
                        warn!(
                            topic = %scenario.topic,
                            error = %e,
                            "[{}/{}] {} ❌",
                            i + 1,
                            total,
                            scenario.topic
                        );
                    }
                }
            }
        }

        let mut multi_turn = PhaseStats::default();
        if self.config.skip_multi_turn {
            info!("Skipping multi-turn phase");
        } else {
            let total = self.config.multi_turn_topics.len();
            let turns = self.config.multi_turn_turns;
            info!(count = total, turns, "Generating multi-turn conversations");

            for (i, topic) in self.config.multi_turn_topics.iter().enumerate() {
                multi_turn.attempted += 1;
                match self.generate_multi_turn(topic, turns).await {
                    Ok(conversation) => {
                        info!(
                            turns = conversation.turn_count(),
                            "[{}/{}] {} ✅",
                            i + 1,
                            total,
                            topic
                        );
                        conversations.push(conversation);
                        multi_turn.succeeded += 1;
                    }
                    Err(e @ GenerationError::Transport(_)) => {
                        warn!(topic = %topic, error = %e, "[{}/{}] {} ❌", i + 1, total, topic);
                    }
                    Err(e) => {
                        warn!(
                            topic = %topic,
                            error = %e,
                            "[{}/{}] {} ⚠️ failed to parse dialogue, skipping",
                            i + 1,
                            total,
                            topic
                        );
                    }
                }
            }
        }

        let report = GenerationReport {
            conversations,
            single_turn,
            multi_turn,
            started_at,
            elapsed: start.elapsed(),
        };

        info!(
            total = report.total(),
            single_turn = report.single_turn.succeeded,
            multi_turn = report.multi_turn.succeeded,
            elapsed_secs = report.elapsed.as_secs_f64(),
            "Generation finished"
        );

        Ok(report)
    }

    /// Runs both phases, then writes every record to the configured output.
    ///
    /// Nothing is written if the run aborts on configuration.
    pub async fn run_to_file(&self) -> Result<(GenerationReport, WriteSummary), RunError> {
        let report = self.run().await?;
        info!(
            count = report.total(),
            path = %self.config.output_path.display(),
            "Saving conversations"
        );
        let summary = JsonlWriter::new(&self.config.output_path).write(&report.conversations)?;
        Ok((report, summary))
    }
}
