//! One-shot search that scans the workspace instead of reading the index.
//!
//! Uses the same scanner, extractor and scorer as the indexed path but keeps
//! no state: every call reads every target file.

use crate::index::extract::{extract_hits, file_date, read_record};
use crate::index::snippet::build_snippet;
use crate::index::types::{Hit, IndexConfig, SearchResult};
use crate::query::executor::SearchOptions;
use crate::query::parser::parse_query;
use crate::query::scorer::{MatchKind, ScoreBoard, Scorer};
use crate::utils::identifiers::IdentifierSet;
use crate::utils::scan_workspace;
use anyhow::Result;
use std::path::Path;

/// Search the workspace directly, without a persisted index
pub fn scan_search(root: &Path, query: &str, options: &SearchOptions) -> Result<Vec<SearchResult>> {
    scan_search_with_config(root, query, options, &IndexConfig::default())
}

/// Direct-scan search with explicit configuration.
///
/// Free-text tokens are not capped here. A query token found in a file's
/// relative path also counts as a token match, with a head-of-file snippet.
pub fn scan_search_with_config(
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

    let scan_config = IndexConfig {
        token_limit: usize::MAX,
        ..config.clone()
    };
    let scorer = Scorer::with_defaults();
    let mut board = ScoreBoard::new();

    for record in scan_workspace(root, config) {
        let Some(text) = read_record(&record, config) else {
            continue;
        };
        let Some(hits) = extract_hits(&text, &scan_config, &identifiers) else {
            continue;
        };
        let date = file_date(&record.rel_path, record.mtime_ms);
        let path_lower = record.rel_path.to_lowercase();

        let lookups = query
            .identifiers
            .iter()
            .map(|k| (MatchKind::Identifier, k))
            .chain(query.tokens.iter().map(|k| (MatchKind::Token, k)));

        for (kind, key) in lookups {
            let weight = scorer.weight_for(kind, key, &query);
            if let Some(hit) = first_hit(&hits, key) {
                board.add(&record.rel_path, &date, weight, || {
                    build_snippet(&text, Some((hit.index, hit.len)))
                });
            } else if kind == MatchKind::Token && path_lower.contains(key.as_str()) {
                board.add(&record.rel_path, &date, weight, || build_snippet(&text, None));
            }
        }
    }

    let results = board.into_results(options.effective_limit());
    tracing::debug!(query = %query.raw, results = results.len(), "scan search complete");
    Ok(results)
}

fn first_hit<'a>(hits: &'a [Hit], key: &str) -> Option<&'a Hit> {
    hits.iter().find(|h| h.key == key)
}
