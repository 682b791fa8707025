use crate::index::reader::{IndexReader, load_document};
use crate::index::types::{IndexConfig, SearchResult};
use crate::query::parser::{Query, parse_query};
use crate::query::scorer::{MatchKind, ScoreBoard, Scorer, ScoringWeights};
use crate::utils::app_data::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT, index_file_path};
use crate::utils::identifiers::IdentifierSet;
use anyhow::Result;
use std::path::Path;

/// Options accepted by the search entry points
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Maximum results (default 8, clamped to 1..=20)
    pub limit: Option<usize>,
}

impl SearchOptions {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }

    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT)
    }
}

/// Query executor over a loaded index
pub struct QueryExecutor<'a> {
    reader: &'a IndexReader,
    scorer: Scorer,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(reader: &'a IndexReader) -> Self {
        Self {
            reader,
            scorer: Scorer::with_defaults(),
        }
    }

    /// Create executor with custom scoring weights
    pub fn with_scoring_weights(reader: &'a IndexReader, weights: ScoringWeights) -> Self {
        Self {
            reader,
            scorer: Scorer::new(weights),
        }
    }

    /// Score every file referenced by the query's identifiers and tokens
    pub fn execute(&self, query: &Query, limit: usize) -> Vec<SearchResult> {
        let mut board = ScoreBoard::new();

        let lookups = query
            .identifiers
            .iter()
            .map(|k| (MatchKind::Identifier, k))
            .chain(query.tokens.iter().map(|k| (MatchKind::Token, k)));

        for (kind, key) in lookups {
            let Some(files) = self.reader.lookup(key) else {
                continue;
            };
            let weight = self.scorer.weight_for(kind, key, query);
            for file in files {
                board.add(&file.path, &file.date, weight, || file.snippet.clone());
            }
        }

        board.into_results(limit)
    }
}

/// Search the persisted index of a workspace
pub fn search_index(root: &Path, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
    search_index_with_config(root, query, options, &IndexConfig::default())
}

/// Search the persisted index with explicit configuration.
///
/// Read-only. A missing or unusable index, an empty query and a query
/// without matches all yield an empty list.
pub fn search_index_with_config(
    root: &Path,
    query: &str,
    options: &SearchOptions,
    config: &IndexConfig,
) -> Result<Vec<SearchResult>> {
    let identifiers = IdentifierSet::new(&config.identifier_schemes)?;
    let query = parse_query(query, &identifiers);
    if query.is_empty() {
        return Ok(Vec::new());
    }

    let index_path = index_file_path(root, config);
    let Some(doc) = load_document(&index_path) else {
        return Ok(Vec::new());
    };
    let reader = IndexReader::from_document(&index_path, doc);

    let results = QueryExecutor::new(&reader).execute(&query, options.effective_limit());
    tracing::debug!(query = %query.raw, results = results.len(), "index search complete");
    Ok(results)
}
