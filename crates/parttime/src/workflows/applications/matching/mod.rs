//! Keyword-overlap compatibility score between a job post and a seeker profile.
//!
//! The score is a cheap heuristic: the share of distinct job keywords that also
//! appear in the seeker's text, plus a flat boost, capped at 100. Empty inputs
//! and job texts without usable keywords score 0.

mod config;
mod tokens;

pub use config::{
    MatchConfig, DEFAULT_BASE_BOOST, DEFAULT_MIN_TOKEN_LEN, DEFAULT_STOP_WORDS, MAX_MATCH_SCORE,
};

use std::collections::HashSet;

use serde::Serialize;

use crate::workflows::catalog::{JobPosting, SeekerProfile};

/// The two free-text sides compared by the scorer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInput {
    pub job_text: String,
    pub seeker_text: String,
}

impl MatchInput {
    pub fn new(job: &JobPosting, seeker: &SeekerProfile) -> Self {
        let job_text = format!("{} {}", job.description, job.title);
        let seeker_text = [&seeker.skills, &seeker.education_background]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            job_text,
            seeker_text,
        }
    }
}

/// Score plus the keywords that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchOutcome {
    pub score: u8,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

impl MatchOutcome {
    fn empty() -> Self {
        Self {
            score: 0,
            matched: Vec::new(),
            missing: Vec::new(),
        }
    }
}

/// Stateless scorer; identical inputs always produce identical scores.
#[derive(Debug, Clone, Default)]
pub struct MatchScorer {
    config: MatchConfig,
}

impl MatchScorer {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn score(&self, job_text: &str, seeker_text: &str) -> u8 {
        self.explain(job_text, seeker_text).score
    }

    pub fn score_input(&self, input: &MatchInput) -> u8 {
        self.score(&input.job_text, &input.seeker_text)
    }

    pub fn explain(&self, job_text: &str, seeker_text: &str) -> MatchOutcome {
        if job_text.is_empty() || seeker_text.is_empty() {
            return MatchOutcome::empty();
        }

        let job_tokens = tokens::tokenize(job_text);
        if job_tokens.is_empty() {
            return MatchOutcome::empty();
        }

        let keywords = tokens::keywords(&job_tokens, &self.config);
        if keywords.is_empty() {
            return MatchOutcome::empty();
        }

        let seeker_tokens: HashSet<String> = tokens::tokenize(seeker_text).into_iter().collect();
        let total = keywords.len();
        let (matched, missing): (Vec<String>, Vec<String>) = keywords
            .into_iter()
            .partition(|keyword| seeker_tokens.contains(keyword));

        let overlap = rounded_percentage(matched.len(), total);
        let boosted = overlap + u32::from(self.config.base_boost);
        let score = boosted.min(u32::from(self.config.ceiling())) as u8;

        MatchOutcome {
            score,
            matched,
            missing,
        }
    }
}

/// `matched / total * 100`, rounded half up.
fn rounded_percentage(matched: usize, total: usize) -> u32 {
    ((matched * 200 + total) / (total * 2)) as u32
}
