//! Scoring shared by indexed and direct-scan search.
//!
//! Scores are additive: every matched key contributes its kind's weight to
//! each file it references, plus a bonus when the key is the whole query.
//! Results sort by score, then by date (newest first).

use crate::index::types::SearchResult;
use crate::query::parser::Query;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// How a query key was matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Structured identifier (ticket, incident, change code)
    Identifier,
    /// Free-text token
    Token,
}

/// Configurable weights for scoring factors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight of a structured identifier match
    pub identifier_weight: u32,
    /// Weight of a free-text token match
    pub token_weight: u32,
    /// Bonus when the matched key equals the whole query
    pub exact_match_bonus: u32,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            identifier_weight: 100,
            token_weight: 2,
            exact_match_bonus: 10,
        }
    }
}

/// Scorer calculates per-key contributions
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    weights: ScoringWeights,
}

impl Scorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    /// Create a scorer with default weights
    pub fn with_defaults() -> Self {
        Self::new(ScoringWeights::default())
    }

    /// Contribution of one matched key to every file referencing it
    pub fn weight_for(&self, kind: MatchKind, key: &str, query: &Query) -> u32 {
        let base = match kind {
            MatchKind::Identifier => self.weights.identifier_weight,
            MatchKind::Token => self.weights.token_weight,
        };
        if query.is_exact(key) {
            base + self.weights.exact_match_bonus
        } else {
            base
        }
    }
}

struct FileScore {
    date: String,
    score: u32,
    best_weight: u32,
    snippet: String,
}

/// Per-file score accumulator
#[derive(Default)]
pub struct ScoreBoard {
    files: FxHashMap<String, FileScore>,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` to `file`'s score. The snippet is kept from the single
    /// contribution with the highest weight; on ties the first one stays.
    pub fn add(&mut self, file: &str, date: &str, weight: u32, snippet: impl FnOnce() -> String) {
        match self.files.get_mut(file) {
            Some(entry) => {
                entry.score += weight;
                if weight > entry.best_weight {
                    entry.best_weight = weight;
                    entry.snippet = snippet();
                }
            }
            None => {
                self.files.insert(
                    file.to_string(),
                    FileScore {
                        date: date.to_string(),
                        score: weight,
                        best_weight: weight,
                        snippet: snippet(),
                    },
                );
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Rank by score descending, then date descending, keeping `limit` results
    pub fn into_results(self, limit: usize) -> Vec<SearchResult> {
        let mut results: Vec<SearchResult> = self
            .files
            .into_iter()
            .map(|(file, s)| SearchResult {
                file,
                date: s.date,
                score: s.score,
                snippet: s.snippet,
            })
            .collect();

        results.sort_by(compare_results);
        results.truncate(limit);
        results
    }
}

/// Score descending, date descending; file path ascending keeps ties stable
pub fn compare_results(a: &SearchResult, b: &SearchResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.date.cmp(&a.date))
        .then_with(|| a.file.cmp(&b.file))
}
