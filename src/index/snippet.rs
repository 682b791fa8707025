//! Human-readable excerpts around index hits.

/// Characters kept before a hit
pub const SNIPPET_BEFORE: usize = 80;

/// Characters kept after the end of a hit
pub const SNIPPET_AFTER: usize = 120;

/// Length of the excerpt used when no hit position is known
pub const SNIPPET_FALLBACK_LEN: usize = 220;

const ELLIPSIS: &str = "…";

/// Build a snippet for a hit at byte `index` spanning `len` bytes.
///
/// With no position (or a position that is not a char boundary inside the
/// text) the snippet is the head of the whitespace-collapsed text.
pub fn build_snippet(text: &str, hit: Option<(usize, usize)>) -> String {
    match hit {
        Some((index, len)) if index <= text.len() && text.is_char_boundary(index) => {
            window_snippet(text, index, len)
        }
        _ => head_snippet(text),
    }
}

fn window_snippet(text: &str, index: usize, len: usize) -> String {
    let start = text[..index]
        .char_indices()
        .rev()
        .nth(SNIPPET_BEFORE - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);

    let mut hit_end = (index + len).min(text.len());
    while !text.is_char_boundary(hit_end) {
        hit_end += 1;
    }
    let end = text[hit_end..]
        .char_indices()
        .nth(SNIPPET_AFTER)
        .map(|(i, _)| hit_end + i)
        .unwrap_or(text.len());

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(ELLIPSIS);
    }
    snippet.push_str(&collapse_whitespace(&text[start..end]));
    if end < text.len() {
        snippet.push_str(ELLIPSIS);
    }
    snippet
}

fn head_snippet(text: &str) -> String {
    let clean = collapse_whitespace(text);
    match clean.char_indices().nth(SNIPPET_FALLBACK_LEN) {
        Some((cut, _)) => format!("{}{}", &clean[..cut], ELLIPSIS),
        None => clean,
    }
}

/// Collapse whitespace runs to single spaces and trim
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
