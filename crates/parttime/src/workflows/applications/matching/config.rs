use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Words ignored when extracting job keywords.
pub const DEFAULT_STOP_WORDS: [&str; 11] = [
    "and", "the", "is", "for", "with", "to", "in", "of", "on", "a", "an",
];

pub const DEFAULT_MIN_TOKEN_LEN: usize = 3;
pub const DEFAULT_BASE_BOOST: u8 = 20;
pub const MAX_MATCH_SCORE: u8 = 100;

/// Tunables for the keyword-overlap heuristic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub stop_words: BTreeSet<String>,
    pub min_token_len: usize,
    pub base_boost: u8,
    pub max_score: u8,
}

impl MatchConfig {
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        self
    }

    /// Upper bound applied to every score; never above 100.
    pub fn ceiling(&self) -> u8 {
        self.max_score.min(MAX_MATCH_SCORE)
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS
                .iter()
                .map(|word| word.to_string())
                .collect(),
            min_token_len: DEFAULT_MIN_TOKEN_LEN,
            base_boost: DEFAULT_BASE_BOOST,
            max_score: MAX_MATCH_SCORE,
        }
    }
}
