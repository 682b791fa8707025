use crate::index::types::*;
use crate::utils::app_data::index_file_path;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Read-only view of a persisted index
pub struct IndexReader {
    index_path: PathBuf,
    pub doc: IndexDocument,
}

impl IndexReader {
    /// Open and validate the index stored at `index_path`
    pub fn open(index_path: &Path) -> Result<Self> {
        if !index_path.exists() {
            anyhow::bail!("No index found. Run 'statusdex index' first.");
        }

        let doc = read_document(index_path)?;
        Ok(Self {
            index_path: index_path.to_path_buf(),
            doc,
        })
    }

    /// Wrap an already loaded document
    pub fn from_document(index_path: &Path, doc: IndexDocument) -> Self {
        Self {
            index_path: index_path.to_path_buf(),
            doc,
        }
    }

    /// Open the index of a workspace
    pub fn open_workspace(root: &Path, config: &IndexConfig) -> Result<Self> {
        Self::open(&index_file_path(root, config))
    }

    /// Files referencing `key`, via binary search over the sorted entries
    pub fn lookup(&self, key: &str) -> Option<&[FileRef]> {
        self.doc
            .entries
            .binary_search_by(|e| e.key.as_str().cmp(key))
            .ok()
            .map(|i| self.doc.entries[i].files.as_slice())
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    pub fn file_count(&self) -> usize {
        self.doc.meta.files.len()
    }

    pub fn key_count(&self) -> usize {
        self.doc.entries.len()
    }

    pub fn last_run(&self) -> &str {
        &self.doc.meta.last_run
    }
}

/// Read, parse and validate an index document
pub fn read_document(index_path: &Path) -> Result<IndexDocument> {
    let file = File::open(index_path)
        .with_context(|| format!("Failed to open {}", index_path.display()))?;
    let doc: IndexDocument = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse {}", index_path.display()))?;
    doc.validate()
        .map_err(|reason| anyhow::anyhow!("Invalid index {}: {}", index_path.display(), reason))?;
    Ok(doc)
}

/// Load a persisted document, treating a missing, unreadable or invalid
/// index as absent.
pub fn load_document(index_path: &Path) -> Option<IndexDocument> {
    if !index_path.exists() {
        tracing::debug!(path = %index_path.display(), "no persisted index");
        return None;
    }

    match read_document(index_path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            let reason = format!("{:#}", e);
            tracing::warn!(path = %index_path.display(), error = %reason, "ignoring unusable index");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::writer::write_document;
    use std::collections::BTreeMap;
    use std::fs;
    use tempfile::tempdir;

    fn sample() -> IndexDocument {
        IndexDocument {
            meta: IndexMeta {
                last_run: "2026-01-25T00:00:00+00:00".to_string(),
                files: BTreeMap::from([("a.md".to_string(), 5)]),
            },
            entries: vec![
                IndexEntry {
                    key: "INC1".to_string(),
                    files: vec![FileRef {
                        path: "a.md".to_string(),
                        date: "2026-01-25".to_string(),
                        snippet: "INC1".to_string(),
                    }],
                },
                IndexEntry {
                    key: "deploy".to_string(),
                    files: vec![FileRef {
                        path: "a.md".to_string(),
                        date: "2026-01-25".to_string(),
                        snippet: "deploy".to_string(),
                    }],
                },
            ],
        }
    }

    #[test]
    fn test_open_and_lookup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");
        write_document(&path, &sample()).unwrap();

        let reader = IndexReader::open(&path).unwrap();
        assert_eq!(reader.file_count(), 1);
        assert_eq!(reader.key_count(), 2);
        assert_eq!(reader.lookup("deploy").unwrap()[0].path, "a.md");
        assert!(reader.lookup("missing").is_none());
    }

    #[test]
    fn test_open_missing() {
        let dir = tempdir().unwrap();
        assert!(IndexReader::open(&dir.path().join("none.json")).is_err());
        assert!(load_document(&dir.path().join("none.json")).is_none());
    }

    #[test]
    fn test_load_document_rejects_corrupt() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("index.json");

        fs::write(&path, "{ not json").unwrap();
        assert!(load_document(&path).is_none());

        fs::write(&path, r#"{"meta": {"lastRun": "x"}, "entries": []}"#).unwrap();
        assert!(load_document(&path).is_none());

        fs::write(&path, r#"{"meta": {"lastRun": "x", "files": {}}}"#).unwrap();
        assert!(load_document(&path).is_none());

        fs::write(&path, r#"{"meta": {"lastRun": "x", "files": {}}, "entries": []}"#).unwrap();
        assert!(load_document(&path).is_some());
    }
}
