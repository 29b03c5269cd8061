//! Dataset export.
//!
//! Provides the JSONL writer used at the end of a generation run and the
//! matching reader used by `inspect`.

pub mod jsonl;

pub use jsonl::{read_jsonl, JsonlWriter, WriteSummary};
