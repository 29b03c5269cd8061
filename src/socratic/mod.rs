//! Socratic interview domain: scenario catalog, prompt templates, response
//! interpretation and the conversation record format.
//!
//! Data flows strictly downstream:
//!
//! ```text
//! catalog -> prompts -> (llm) -> interpreter -> record
//! ```

pub mod catalog;
pub mod interpreter;
pub mod prompts;
pub mod record;

pub use catalog::{
    multi_turn_topics, scenarios, Scenario, Stimulus, DEFAULT_MULTI_TURN_TURNS,
    MULTI_TURN_TOPICS,
};
pub use interpreter::{interpret_multi_turn, interpret_single_turn};
pub use prompts::{build_multi_turn_prompt, build_single_turn_prompt, PromptPair};
pub use record::{Conversation, Metadata, Speaker, Turn};
