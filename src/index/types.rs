use crate::utils::identifiers::IdentifierScheme;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Modification time in milliseconds since the Unix epoch
pub type MtimeMs = u64;

/// Snapshot of every file the index currently reflects: relative path -> mtime
pub type FileSnapshot = BTreeMap<String, MtimeMs>;

/// Index metadata stored alongside the entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexMeta {
    /// Time of the run that produced the document (informational only)
    pub last_run: String,
    /// Sole staleness oracle for incremental updates
    pub files: FileSnapshot,
}

/// One file referencing an index key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub path: String,
    pub date: String,
    pub snippet: String,
}

/// An index key and every file that produced a hit for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub key: String,
    pub files: Vec<FileRef>,
}

/// The persisted inverted index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub meta: IndexMeta,
    pub entries: Vec<IndexEntry>,
}

impl IndexDocument {
    /// Check the invariants a loaded document must satisfy: keys strictly
    /// ascending, no empty entries, paths strictly ascending within an entry
    /// (so none repeats), and every referenced path present in the snapshot.
    /// Runs in linear time over the document.
    pub fn validate(&self) -> Result<(), String> {
        let mut prev: Option<&str> = None;
        for entry in &self.entries {
            if let Some(p) = prev {
                if p >= entry.key.as_str() {
                    return Err(format!("entry keys out of order at {:?}", entry.key));
                }
            }
            prev = Some(&entry.key);

            if entry.files.is_empty() {
                return Err(format!("entry {:?} has no files", entry.key));
            }

            let mut prev_path: Option<&str> = None;
            for file in &entry.files {
                if !self.meta.files.contains_key(&file.path) {
                    return Err(format!(
                        "entry {:?} references unknown file {:?}",
                        entry.key, file.path
                    ));
                }
                if let Some(p) = prev_path {
                    if p >= file.path.as_str() {
                        return Err(format!(
                            "entry {:?} files out of order at {:?}",
                            entry.key, file.path
                        ));
                    }
                }
                prev_path = Some(&file.path);
            }
        }
        Ok(())
    }
}

/// A file found by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub abs_path: PathBuf,
    /// Workspace-relative path with `/` separators
    pub rel_path: String,
    pub mtime_ms: MtimeMs,
    /// Size in bytes at scan time
    pub size: u64,
}

/// A candidate index hit: key plus byte position/length in the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub key: String,
    pub index: usize,
    pub len: usize,
}

/// A ranked search hit: one per matching file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    pub file: String,
    pub date: String,
    pub score: u32,
    pub snippet: String,
}

/// Result of a full rebuild
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
    pub index_path: PathBuf,
    pub file_count: usize,
    pub key_count: usize,
}

/// Result of an incremental update
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSummary {
    pub index_path: PathBuf,
    pub file_count: usize,
    pub key_count: usize,
    pub changed: usize,
    pub removed: usize,
}

/// Configuration for the indexer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Distinct free-text tokens tracked per file
    pub token_limit: usize,
    /// Files larger than this (bytes) are skipped
    pub max_file_size: u64,
    /// Workspace-relative directories that are scanned
    pub target_dirs: Vec<String>,
    /// Accepted file extensions (without the dot, lowercase)
    pub extensions: Vec<String>,
    /// Workspace-relative location of the persisted index
    pub index_path: String,
    /// Structured identifier grammars, in priority order
    pub identifier_schemes: Vec<IdentifierScheme>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            token_limit: 500,
            max_file_size: 2 * 1024 * 1024,
            target_dirs: vec![
                "logs/daily".to_string(),
                "data/tasks".to_string(),
                "data/projects".to_string(),
                "reports".to_string(),
            ],
            extensions: ["md", "txt", "log", "json", "yaml", "yml"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            index_path: "data/index/workspace-index.json".to_string(),
            identifier_schemes: IdentifierScheme::defaults(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(entries: Vec<IndexEntry>, files: &[&str]) -> IndexDocument {
        IndexDocument {
            meta: IndexMeta {
                last_run: String::new(),
                files: files.iter().map(|f| (f.to_string(), 1)).collect(),
            },
            entries,
        }
    }

    fn file(path: &str) -> FileRef {
        FileRef {
            path: path.to_string(),
            date: "2026-01-01".to_string(),
            snippet: String::new(),
        }
    }

    #[test]
    fn test_document_json_shape() {
        let d = doc(
            vec![IndexEntry {
                key: "INC1".to_string(),
                files: vec![file("a.md")],
            }],
            &["a.md"],
        );
        let json = serde_json::to_value(&d).unwrap();
        assert!(json["meta"]["lastRun"].is_string());
        assert_eq!(json["meta"]["files"]["a.md"], 1);
        assert_eq!(json["entries"][0]["key"], "INC1");
        assert_eq!(json["entries"][0]["files"][0]["path"], "a.md");
    }

    #[test]
    fn test_validate_accepts_consistent_document() {
        let d = doc(
            vec![
                IndexEntry {
                    key: "INC1".to_string(),
                    files: vec![file("a.md"), file("b.md")],
                },
                IndexEntry {
                    key: "alpha".to_string(),
                    files: vec![file("a.md")],
                },
            ],
            &["a.md", "b.md"],
        );
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_path() {
        let d = doc(
            vec![IndexEntry {
                key: "INC1".to_string(),
                files: vec![file("gone.md")],
            }],
            &["a.md"],
        );
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicates_and_empty() {
        let dup_key = doc(
            vec![
                IndexEntry {
                    key: "INC1".to_string(),
                    files: vec![file("a.md")],
                },
                IndexEntry {
                    key: "INC1".to_string(),
                    files: vec![file("a.md")],
                },
            ],
            &["a.md"],
        );
        assert!(dup_key.validate().is_err());

        let dup_path = doc(
            vec![IndexEntry {
                key: "INC1".to_string(),
                files: vec![file("a.md"), file("a.md")],
            }],
            &["a.md"],
        );
        assert!(dup_path.validate().is_err());

        let empty = doc(
            vec![IndexEntry {
                key: "INC1".to_string(),
                files: vec![],
            }],
            &["a.md"],
        );
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_validate_requires_sorted_paths() {
        let unsorted = doc(
            vec![IndexEntry {
                key: "deploy".to_string(),
                files: vec![file("b.md"), file("a.md")],
            }],
            &["a.md", "b.md"],
        );
        assert!(unsorted.validate().is_err());
    }

    #[test]
    fn test_validate_large_entry() {
        // One template word shared by every daily log
        let paths: Vec<String> = (0..20_000)
            .map(|i| format!("logs/daily/{:05}.md", i))
            .collect();
        let names: Vec<&str> = paths.iter().map(|p| p.as_str()).collect();
        let d = doc(
            vec![IndexEntry {
                key: "standup".to_string(),
                files: paths.iter().map(|p| file(p)).collect(),
            }],
            &names,
        );

        let start = std::time::Instant::now();
        assert!(d.validate().is_ok());
        assert!(start.elapsed() < std::time::Duration::from_secs(2));
    }

    #[test]
    fn test_config_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.token_limit, 500);
        assert_eq!(config.max_file_size, 2 * 1024 * 1024);
        assert!(config.extensions.contains(&"yml".to_string()));
        assert_eq!(config.target_dirs.len(), 4);
    }

    #[test]
    fn test_config_partial_json() {
        let config: IndexConfig = serde_json::from_str(r#"{"token_limit": 10}"#).unwrap();
        assert_eq!(config.token_limit, 10);
        assert_eq!(config.index_path, "data/index/workspace-index.json");
    }
}
