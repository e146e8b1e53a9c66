use std::collections::HashSet;

use super::config::MatchConfig;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Lowercased word tokens in order of appearance.
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Distinct job keywords: long enough, not a stop word, first occurrence kept.
pub(crate) fn keywords(tokens: &[String], config: &MatchConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    tokens
        .iter()
        .filter(|token| token.len() >= config.min_token_len)
        .filter(|token| !config.stop_words.contains(token.as_str()))
        .filter(|token| seen.insert(*token))
        .cloned()
        .collect()
}
