//! Context snippet value object and its usability threshold

use crate::core::string::trimmed_char_len;
use serde::{Deserialize, Serialize};

/// Marker text standing in for "no result" from the knowledge source.
pub const NO_CONTEXT_SENTINEL: &str =
    "Sorry, no relevant context could be retrieved from Wikipedia.";

/// Minimum trimmed length (in characters) for a snippet to enter a prompt.
pub const MIN_CONTEXT_CHARS: usize = 50;

/// Background text retrieved for a question (Value Object)
///
/// Produced by the context retriever and read-only downstream. A snippet is
/// *usable* only when it was found, is at least [`MIN_CONTEXT_CHARS`]
/// characters after trimming, and is not the [`NO_CONTEXT_SENTINEL`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnippet {
    pub text: String,
    pub present: bool,
}

impl ContextSnippet {
    /// A snippet the knowledge source reported as found
    pub fn found(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            present: true,
        }
    }

    /// The "no context" sentinel snippet
    pub fn unusable() -> Self {
        Self {
            text: NO_CONTEXT_SENTINEL.to_string(),
            present: false,
        }
    }

    pub fn is_usable(&self) -> bool {
        self.present
            && trimmed_char_len(&self.text) >= MIN_CONTEXT_CHARS
            && self.text.trim() != NO_CONTEXT_SENTINEL
    }
}

impl Default for ContextSnippet {
    fn default() -> Self {
        Self::unusable()
    }
}
