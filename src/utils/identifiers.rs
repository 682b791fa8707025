//! Structured identifier grammars (ticket, incident, change codes).
//!
//! Each scheme is a fixed prefix followed by digits, optionally followed by a
//! `-` separator and more digits. Schemes are compiled once into
//! case-insensitive, word-bounded regexes and evaluated in priority order.

use crate::index::types::Hit;
use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// What may follow the main digit run of an identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixPolicy {
    /// Nothing: `INC12345`
    None,
    /// An optional `-` and digits: `PTI2025-777`
    OptionalDigits,
}

/// One identifier grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifierScheme {
    pub name: String,
    pub prefix: String,
    /// Minimum length of the digit run after the prefix
    pub min_digits: usize,
    pub suffix: SuffixPolicy,
}

impl IdentifierScheme {
    pub fn new(name: &str, prefix: &str, min_digits: usize, suffix: SuffixPolicy) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            min_digits,
            suffix,
        }
    }

    /// Built-in schemes, highest priority first
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("ticket", "PTI", 1, SuffixPolicy::OptionalDigits),
            Self::new("incident", "INC", 1, SuffixPolicy::OptionalDigits),
            Self::new("change", "CHG", 1, SuffixPolicy::OptionalDigits),
            Self::new("request", "RITM", 1, SuffixPolicy::OptionalDigits),
        ]
    }

    fn pattern(&self) -> String {
        let suffix = match self.suffix {
            SuffixPolicy::None => "",
            SuffixPolicy::OptionalDigits => "(?:-[0-9]+)?",
        };
        format!(
            r"(?i)\b{}[0-9]{{{},}}{}\b",
            regex::escape(&self.prefix),
            self.min_digits.max(1),
            suffix
        )
    }
}

/// Compiled identifier schemes
#[derive(Debug, Clone)]
pub struct IdentifierSet {
    patterns: Vec<(String, Regex)>,
}

impl IdentifierSet {
    pub fn new(schemes: &[IdentifierScheme]) -> Result<Self> {
        let patterns = schemes
            .iter()
            .map(|scheme| {
                let re = Regex::new(&scheme.pattern()).with_context(|| {
                    format!("Invalid identifier scheme {:?}", scheme.name)
                })?;
                Ok((scheme.name.clone(), re))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { patterns })
    }

    /// Every identifier occurrence in `text`, scheme by scheme in priority
    /// order, text order within a scheme. Keys are uppercased.
    pub fn find_all(&self, text: &str) -> Vec<Hit> {
        let mut hits = Vec::new();
        for (_, re) in &self.patterns {
            for m in re.find_iter(text) {
                hits.push(Hit {
                    key: m.as_str().to_uppercase(),
                    index: m.start(),
                    len: m.len(),
                });
            }
        }
        hits
    }

    /// Distinct uppercase identifier keys in first-seen order
    pub fn extract_keys(&self, text: &str) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for hit in self.find_all(text) {
            if !keys.contains(&hit.key) {
                keys.push(hit.key);
            }
        }
        keys
    }

    /// Name of the scheme that matches `key` entirely, if any
    pub fn scheme_of(&self, key: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|(_, re)| re.find(key).is_some_and(|m| m.start() == 0 && m.end() == key.len()))
            .map(|(name, _)| name.as_str())
    }
}

impl Default for IdentifierSet {
    fn default() -> Self {
        let patterns = IdentifierScheme::defaults()
            .iter()
            .filter_map(|scheme| Regex::new(&scheme.pattern()).ok().map(|re| (scheme.name.clone(), re)))
            .collect();
        Self { patterns }
    }
}
