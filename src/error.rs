//! Error types for socratic-forge operations.
//!
//! Defines error types for the major subsystems:
//! - LLM API interactions
//! - Per-item conversation generation
//! - Dataset export to the filesystem

use thiserror::Error;

/// Errors that can occur during LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse LLM response: {0}")]
    ParseError(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("API error ({code}): {message}")]
    ApiError { code: u16, message: String },
}

/// Errors that can occur while generating a single conversation.
///
/// Every variant is recoverable at the pipeline level: the item is dropped
/// and the run moves on to the next scenario or topic.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The completion call itself failed (network, auth, rate limit).
    #[error("Completion request failed: {0}")]
    Transport(#[from] LlmError),

    /// The model returned text that does not parse as a conversation.
    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    /// The parsed turns violate the conversation shape.
    #[error("Invalid conversation turns: {0}")]
    InvalidTurns(String),
}

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Filesystem error at '{path}': {source}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid record on line {line}: {source}")]
    InvalidRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExportError {
    pub(crate) fn filesystem(path: &std::path::Path, source: std::io::Error) -> Self {
        ExportError::Filesystem {
            path: path.display().to_string(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_error_from_llm_error() {
        let err: GenerationError = LlmError::RateLimited("slow down".to_string()).into();
        assert!(matches!(err, GenerationError::Transport(LlmError::RateLimited(_))));
        assert_eq!(
            err.to_string(),
            "Completion request failed: Rate limited: slow down"
        );
    }

    #[test]
    fn test_export_error_mentions_path() {
        let err = ExportError::filesystem(
            std::path::Path::new("data/out.jsonl"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("data/out.jsonl"));
    }
}
