//! LLM integration for socratic-forge.
//!
//! [`LiteLlmClient`] talks to any OpenAI-compatible chat completion endpoint
//! (Groq by default). [`CompletionClient`] wraps a provider with the
//! per-call sampling parameters and pacing used by the dataset generator.
//!
//! ```ignore
//! use socratic_forge::llm::{CompletionClient, GenerationProfile, LiteLlmClient, Message};
//! use std::sync::Arc;
//!
//! let provider = Arc::new(LiteLlmClient::groq(api_key));
//! let client = CompletionClient::new(provider, "llama-3.3-70b-versatile");
//! let text = client
//!     .complete(vec![Message::user("Hello")], &GenerationProfile::single_turn())
//!     .await?;
//! ```

pub mod completion;
pub mod litellm;

pub use completion::{CompletionClient, GenerationProfile};
pub use litellm::{
    Choice, GenerationRequest, GenerationResponse, LiteLlmClient, LlmProvider, Message, Usage,
    DEFAULT_MODEL, GROQ_API_BASE,
};
