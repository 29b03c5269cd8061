//! Code-fence stripping for structured LLM output.
//!
//! Models asked for "JSON only" still wrap their answer in markdown fences
//! often enough that the fences must be removed before parsing.
//!
//! # Example
//!
//! ```
//! use socratic_forge::utils::json_extraction::strip_code_fence;
//!
//! let response = "```json\n{\"conversations\": []}\n```";
//! assert_eq!(strip_code_fence(response), "{\"conversations\": []}");
//!
//! // Text without fences is only trimmed.
//! assert_eq!(strip_code_fence("  {}  "), "{}");
//! ```

use std::sync::OnceLock;

use regex::Regex;

const FENCE: &str = "```";

/// Language tag directly after an opening fence, e.g. the "json" of "```json".
fn fence_tag() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\A[A-Za-z][\w+-]*[ \t]*\r?\n?").expect("fence tag pattern is valid")
    })
}

/// Strips surrounding markdown code fences from an LLM response.
///
/// Fence markers are paired in order (open, close, open, ...), so text
/// following a closing marker is never mistaken for a language tag.
///
/// Strategy order:
/// 1. Interior of the first block whose opening fence carries a language tag
/// 2. Interior of the first block
/// 3. The trimmed text unchanged
///
/// An unclosed block runs to the end of the text. The result is always
/// trimmed, and applying the function to its own output returns the same string.
pub fn strip_code_fence(content: &str) -> String {
    let trimmed = content.trim();
    let markers: Vec<usize> = trimmed.match_indices(FENCE).map(|(i, _)| i).collect();

    if markers.is_empty() {
        return trimmed.to_string();
    }

    let interior = |open: usize, skip: usize| {
        let start = markers[open] + FENCE.len() + skip;
        let end = markers.get(open + 1).copied().unwrap_or(trimmed.len());
        trimmed[start..end].trim().to_string()
    };

    for open in (0..markers.len()).step_by(2) {
        let after = &trimmed[markers[open] + FENCE.len()..];
        if let Some(tag) = fence_tag().find(after) {
            return interior(open, tag.end());
        }
    }

    interior(0, 0)
}

/// Returns true if the text contains any fence marker.
pub fn has_code_fence(content: &str) -> bool {
    content.contains(FENCE)
}
