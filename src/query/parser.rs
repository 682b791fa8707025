use crate::utils::identifiers::IdentifierSet;
use crate::utils::tokenizer::tokenize_query;

/// Parsed query representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// The trimmed query text, used for the exact-match bonus
    pub raw: String,
    /// Structured identifiers (uppercase), matched precisely
    pub identifiers: Vec<String>,
    /// Free-text tokens (lowercase)
    pub tokens: Vec<String>,
}

impl Query {
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty() && self.tokens.is_empty()
    }

    /// Whether `key` equals the whole lowercased query verbatim. Identifier
    /// keys are uppercase, so only token keys can match.
    pub fn is_exact(&self, key: &str) -> bool {
        !self.raw.is_empty() && key == self.raw.to_lowercase()
    }
}

/// Parse a free-text query into identifier and token lookups
pub fn parse_query(input: &str, identifiers: &IdentifierSet) -> Query {
    let raw = input.trim().to_string();
    Query {
        identifiers: identifiers.extract_keys(&raw),
        tokens: tokenize_query(&raw),
        raw,
    }
}
