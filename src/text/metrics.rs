//! Length metrics for text blobs.

use serde::{Deserialize, Serialize};

/// Character, word and approximate token counts of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextMetrics {
    pub characters: usize,    // Unicode code points
    pub words: usize,         // Whitespace-delimited tokens
    pub approx_tokens: usize, // characters / 4
}

impl TextMetrics {
    /// Compute metrics for `text`.
    ///
    /// The token count is a rough heuristic (one token per four characters),
    /// only good enough for duration estimates.
    pub fn of(text: &str) -> Self {
        let characters = text.chars().count();
        Self { characters, words: text.split_whitespace().count(), approx_tokens: characters / 4 }
    }
}
