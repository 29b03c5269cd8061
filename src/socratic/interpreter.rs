//! Interpretation of raw model output into conversation turns.

use serde::Deserialize;

use crate::error::GenerationError;
use crate::utils::json_extraction::{has_code_fence, strip_code_fence};

use super::record::Turn;

/// Shape the multi-turn prompt asks the model to emit. Extra keys are ignored.
#[derive(Debug, Deserialize)]
struct DialoguePayload {
    conversations: Vec<Turn>,
}

/// Single-turn replies are used verbatim after trimming.
pub fn interpret_single_turn(raw: &str) -> String {
    raw.trim().to_string()
}

/// Parses a multi-turn dialogue out of the model's reply.
///
/// Surrounding code fences are stripped before parsing.
///
/// # Errors
///
/// Returns `GenerationError::MalformedResponse` if the text is not a JSON
/// object with a `conversations` array of `{from, value}` turns.
pub fn interpret_multi_turn(raw: &str) -> Result<Vec<Turn>, GenerationError> {
    if has_code_fence(raw) {
        tracing::debug!("Stripping code fence from dialogue response");
    }
    let payload = strip_code_fence(raw);

    serde_json::from_str::<DialoguePayload>(&payload)
        .map(|dialogue| dialogue.conversations)
        .map_err(|e| {
            let preview: String = payload.chars().take(80).collect();
            GenerationError::MalformedResponse(format!("{e} (response starts with: {preview:?})"))
        })
}
