use crate::index::types::Hit;
use std::collections::HashSet;

/// Minimum token length (in chars) stored in the index
pub const MIN_CONTENT_TOKEN_LEN: usize = 3;

/// Minimum token length (in chars) taken from a query
pub const MIN_QUERY_TOKEN_LEN: usize = 2;

#[inline]
fn is_token_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

/// Walk the runs of token characters in `text`, calling `f(start, end)` with
/// byte offsets. Stops early when `f` returns false.
fn for_each_run(text: &str, mut f: impl FnMut(usize, usize) -> bool) {
    let mut run_start: Option<usize> = None;

    for (i, ch) in text.char_indices() {
        if is_token_char(ch) {
            if run_start.is_none() {
                run_start = Some(i);
            }
        } else if let Some(start) = run_start.take() {
            if !f(start, i) {
                return;
            }
        }
    }

    if let Some(start) = run_start {
        f(start, text.len());
    }
}

/// Extract free-text tokens from file content.
///
/// Tokens are lowercased runs of alphanumeric, `-` and `_` characters at least
/// [`MIN_CONTENT_TOKEN_LEN`] chars long. Only the first occurrence of each
/// token is kept, and scanning stops once `limit` distinct tokens are found.
pub fn extract_content_tokens(text: &str, limit: usize) -> Vec<Hit> {
    let mut hits = Vec::new();
    if limit == 0 {
        return hits;
    }

    let mut seen = HashSet::new();
    for_each_run(text, |start, end| {
        let run = &text[start..end];
        if run.chars().count() < MIN_CONTENT_TOKEN_LEN {
            return true;
        }
        let token = run.to_lowercase();
        if seen.insert(token.clone()) {
            hits.push(Hit {
                key: token,
                index: start,
                len: end - start,
            });
        }
        hits.len() < limit
    });

    hits
}

/// Extract tokens suitable for query matching: distinct, lowercased, in
/// first-seen order, at least [`MIN_QUERY_TOKEN_LEN`] chars long.
pub fn tokenize_query(query: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for_each_run(query, |start, end| {
        let run = &query[start..end];
        if run.chars().count() >= MIN_QUERY_TOKEN_LEN {
            let token = run.to_lowercase();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        true
    });
    tokens
}
