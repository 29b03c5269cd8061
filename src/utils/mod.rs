//! Shared utility functions for socratic-forge.
//!
//! Currently holds the code-fence stripping applied to structured LLM output.

pub mod json_extraction;

pub use json_extraction::{has_code_fence, strip_code_fence};
