//! Paced completion adapter used by the dataset generator.
//!
//! Wraps an [`LlmProvider`] and turns a message list into the text of the
//! first choice. Every call is followed by the profile's pacing delay, whether
//! the call succeeded or not.

use std::sync::Arc;
use std::time::Duration;

use crate::error::LlmError;
use crate::llm::{GenerationRequest, LlmProvider, Message};

/// Sampling parameters and pacing for one kind of completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProfile {
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens for the completion.
    pub max_tokens: u32,
    /// Pause imposed after every call.
    pub pacing: Duration,
}

impl GenerationProfile {
    /// Profile for single-turn Socratic replies.
    pub fn single_turn() -> Self {
        Self {
            temperature: 0.8,
            max_tokens: 150,
            pacing: Duration::from_millis(1000),
        }
    }

    /// Profile for whole multi-turn dialogues.
    pub fn multi_turn() -> Self {
        Self {
            temperature: 0.9,
            max_tokens: 500,
            pacing: Duration::from_millis(1500),
        }
    }

    /// Sets the pacing delay.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the maximum tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Completion adapter over an [`LlmProvider`].
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn LlmProvider>,
    model: String,
}

impl std::fmt::Debug for CompletionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionClient")
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

impl CompletionClient {
    /// Creates an adapter that sends every request to `model`.
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// Model identifier used for requests.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Requests a completion and returns the first choice's text.
    ///
    /// Sleeps `profile.pacing` before returning on both the success and the
    /// failure path.
    pub async fn complete(
        &self,
        messages: Vec<Message>,
        profile: &GenerationProfile,
    ) -> Result<String, LlmError> {
        let request = GenerationRequest::new(self.model.clone(), messages)
            .with_temperature(profile.temperature)
            .with_max_tokens(profile.max_tokens);

        let result = self.provider.generate(request).await.and_then(|response| {
            tracing::debug!(
                model = %response.model,
                prompt_tokens = response.usage.prompt_tokens,
                completion_tokens = response.usage.completion_tokens,
                "Completion received"
            );
            response
                .first_content()
                .map(str::to_string)
                .ok_or_else(|| LlmError::ParseError("No content in LLM response".to_string()))
        });

        if !profile.pacing.is_zero() {
            tokio::time::sleep(profile.pacing).await;
        }

        result
    }
}
