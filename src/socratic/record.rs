//! ShareGPT-style conversation records and their assembly.
//!
//! One [`Conversation`] is one JSONL line of the output dataset:
//!
//! ```text
//! {"conversations":[{"from":"human","value":"..."},{"from":"gpt","value":"..."}],"metadata":{"topic":"...","context":"..."}}
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

use super::catalog::Scenario;

/// Who speaks a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// The candidate.
    Human,
    /// The interviewer (the model being trained).
    Gpt,
}

impl Speaker {
    /// The speaker expected to reply to this one.
    pub fn other(self) -> Self {
        match self {
            Speaker::Human => Speaker::Gpt,
            Speaker::Gpt => Speaker::Human,
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Speaker::Human => write!(f, "human"),
            Speaker::Gpt => write!(f, "gpt"),
        }
    }
}

/// A single utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub from: Speaker,
    pub value: String,
}

impl Turn {
    pub fn human(value: impl Into<String>) -> Self {
        Self {
            from: Speaker::Human,
            value: value.into(),
        }
    }

    pub fn gpt(value: impl Into<String>) -> Self {
        Self {
            from: Speaker::Gpt,
            value: value.into(),
        }
    }
}

/// Per-record metadata. Single-turn records carry `context`, multi-turn
/// records carry `multi_turn: true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multi_turn: Option<bool>,
}

/// One dataset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub conversations: Vec<Turn>,
    pub metadata: Metadata,
}

impl Conversation {
    /// Assembles a single-turn record: the candidate's stimulus followed by
    /// the interviewer's reply.
    pub fn single_turn(scenario: &Scenario, reply: impl Into<String>) -> Self {
        Self {
            conversations: vec![Turn::human(scenario.stimulus.text()), Turn::gpt(reply)],
            metadata: Metadata {
                topic: scenario.topic.clone(),
                context: Some(scenario.context.clone()),
                multi_turn: None,
            },
        }
    }

    /// Assembles a multi-turn record from parsed turns.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::InvalidTurns` if `turns` is empty, does not
    /// open with the human speaker, or does not alternate speakers.
    pub fn multi_turn(topic: impl Into<String>, turns: Vec<Turn>) -> Result<Self, GenerationError> {
        validate_turns(&turns)?;
        Ok(Self {
            conversations: turns,
            metadata: Metadata {
                topic: topic.into(),
                context: None,
                multi_turn: Some(true),
            },
        })
    }

    /// Whether this record came from the multi-turn phase.
    pub fn is_multi_turn(&self) -> bool {
        self.metadata.multi_turn.unwrap_or(false)
    }

    pub fn turn_count(&self) -> usize {
        self.conversations.len()
    }

    pub fn topic(&self) -> &str {
        &self.metadata.topic
    }
}

/// Checks the non-empty, human-first, alternating shape.
pub fn validate_turns(turns: &[Turn]) -> Result<(), GenerationError> {
    let first = turns
        .first()
        .ok_or_else(|| GenerationError::InvalidTurns("conversation has no turns".to_string()))?;

    if first.from != Speaker::Human {
        return Err(GenerationError::InvalidTurns(format!(
            "conversation starts with '{}' instead of 'human'",
            first.from
        )));
    }

    for (index, pair) in turns.windows(2).enumerate() {
        if pair[1].from != pair[0].from.other() {
            return Err(GenerationError::InvalidTurns(format!(
                "turn {} repeats speaker '{}'",
                index + 1,
                pair[1].from
            )));
        }
    }

    Ok(())
}
