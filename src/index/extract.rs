use crate::index::types::{FileRecord, Hit, IndexConfig, MtimeMs};
use crate::utils::identifiers::IdentifierSet;
use crate::utils::tokenizer::extract_content_tokens;
use chrono::DateTime;
use regex::Regex;
use std::fs;
use std::sync::OnceLock;

/// Check whether content should be treated as binary (contains a NUL byte)
#[inline]
pub fn is_binary(content: &[u8]) -> bool {
    memchr::memchr(0, content).is_some()
}

/// Read a scanned file's text.
///
/// Files whose scanned size is over the ceiling are rejected before any read.
/// Unreadable files (including invalid UTF-8) yield `None` as well.
pub fn read_record(record: &FileRecord, config: &IndexConfig) -> Option<String> {
    if record.size > config.max_file_size {
        tracing::debug!(path = %record.rel_path, size = record.size, "skipping over-limit file");
        return None;
    }
    match fs::read_to_string(&record.abs_path) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!(path = %record.rel_path, error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Extract every candidate hit from a file's text.
///
/// Returns `None` for files over the size ceiling or with binary content.
/// Identifier hits come first (all occurrences), then the capped free-text
/// token hits.
pub fn extract_hits(text: &str, config: &IndexConfig, identifiers: &IdentifierSet) -> Option<Vec<Hit>> {
    if text.len() as u64 > config.max_file_size || is_binary(text.as_bytes()) {
        return None;
    }

    let mut hits = identifiers.find_all(text);
    hits.extend(extract_content_tokens(text, config.token_limit));
    Some(hits)
}

fn path_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2}").expect("valid date regex"))
}

/// Date used for ranking a file: a `YYYY-MM-DD` found in its relative path,
/// otherwise the UTC calendar date of its modification time.
pub fn file_date(rel_path: &str, mtime_ms: MtimeMs) -> String {
    if let Some(m) = path_date_regex().find(rel_path) {
        return m.as_str().to_string();
    }

    DateTime::from_timestamp_millis(mtime_ms as i64)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "1970-01-01".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hits_both_passes() {
        let config = IndexConfig::default();
        let hits = extract_hits("INC12345 falhou em produção.", &config, &IdentifierSet::default())
            .unwrap();
        let keys: Vec<_> = hits.iter().map(|h| h.key.as_str()).collect();
        assert_eq!(keys, vec!["INC12345", "inc12345", "falhou", "produção"]);
    }

    #[test]
    fn test_extract_hits_skips_binary_and_large() {
        let mut config = IndexConfig::default();
        let ids = IdentifierSet::default();
        assert!(extract_hits("abc\0def", &config, &ids).is_none());

        config.max_file_size = 4;
        assert!(extract_hits("hello", &config, &ids).is_none());
        assert!(extract_hits("hell", &config, &ids).is_some());
    }

    #[test]
    fn test_file_date_from_path() {
        assert_eq!(file_date("logs/daily/2026-01-25.md", 0), "2026-01-25");
    }

    #[test]
    fn test_file_date_from_mtime() {
        // 2026-01-25T12:00:00Z
        assert_eq!(file_date("data/tasks/task-log.json", 1_769_342_400_000), "2026-01-25");
    }
}
