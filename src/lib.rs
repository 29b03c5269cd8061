//! socratic-forge: Socratic interviewer dataset generator.
//!
//! Asks a chat-completion model to play a Socratic technical interviewer for a
//! fixed catalog of scenarios and topics, and writes the results as
//! ShareGPT-style JSONL for fine-tuning.

pub mod cli;
pub mod error;
pub mod export;
pub mod llm;
pub mod pipeline;
pub mod socratic;
pub mod utils;

// Re-export commonly used error types
pub use error::{ExportError, GenerationError, LlmError};
