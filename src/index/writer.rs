use crate::index::extract::{extract_hits, file_date};
use crate::index::snippet::build_snippet;
use crate::index::types::*;
use crate::utils::identifiers::IdentifierSet;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// In-memory inverted index used for building and merging.
///
/// Keys map to the files that hit them, keyed by path, so a `(key, path)`
/// pair can only be stored once and serialization order is fixed.
pub struct IndexWriter {
    config: IndexConfig,
    identifiers: IdentifierSet,
    /// Key -> path -> file reference
    postings: BTreeMap<String, BTreeMap<String, FileRef>>,
    /// Relative path -> mtime of every file the index reflects
    snapshot: FileSnapshot,
}

impl IndexWriter {
    /// Create an empty index writer
    pub fn new(config: IndexConfig) -> Result<Self> {
        let identifiers = IdentifierSet::new(&config.identifier_schemes)?;
        Ok(Self {
            config,
            identifiers,
            postings: BTreeMap::new(),
            snapshot: FileSnapshot::new(),
        })
    }

    /// Rebuild the in-memory form of a persisted document
    pub fn from_document(config: IndexConfig, doc: IndexDocument) -> Result<Self> {
        let mut writer = Self::new(config)?;
        writer.snapshot = doc.meta.files;
        for entry in doc.entries {
            let files = writer.postings.entry(entry.key).or_default();
            for file in entry.files {
                files.entry(file.path.clone()).or_insert(file);
            }
        }
        Ok(writer)
    }

    /// Extract hits from a file's text and merge them into the index.
    ///
    /// The date is computed once per file. A `(key, path)` pair that already
    /// exists is never overwritten, so the first hit of a key wins. Returns
    /// false when the file was skipped (too large or binary).
    pub fn add_file(&mut self, record: &FileRecord, text: &str) -> bool {
        let Some(hits) = extract_hits(text, &self.config, &self.identifiers) else {
            tracing::debug!(path = %record.rel_path, "skipping over-limit or binary file");
            return false;
        };

        let date = file_date(&record.rel_path, record.mtime_ms);
        for hit in hits {
            let files = self.postings.entry(hit.key).or_default();
            if files.contains_key(&record.rel_path) {
                continue;
            }
            files.insert(
                record.rel_path.clone(),
                FileRef {
                    path: record.rel_path.clone(),
                    date: date.clone(),
                    snippet: build_snippet(text, Some((hit.index, hit.len))),
                },
            );
        }
        true
    }

    /// Strip every reference to `path`, dropping entries left without files.
    /// Returns the number of entries that referenced it.
    pub fn remove_path(&mut self, path: &str) -> usize {
        let mut removed = 0;
        self.postings.retain(|_, files| {
            if files.remove(path).is_some() {
                removed += 1;
            }
            !files.is_empty()
        });
        removed
    }

    /// Replace the file snapshot with the given scan results
    pub fn set_snapshot(&mut self, records: &[FileRecord]) {
        self.snapshot = records
            .iter()
            .map(|r| (r.rel_path.clone(), r.mtime_ms))
            .collect();
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn snapshot(&self) -> &FileSnapshot {
        &self.snapshot
    }

    pub fn key_count(&self) -> usize {
        self.postings.len()
    }

    pub fn file_count(&self) -> usize {
        self.snapshot.len()
    }

    /// Flatten into the persisted document, entries sorted by key
    pub fn to_document(&self, last_run: String) -> IndexDocument {
        IndexDocument {
            meta: IndexMeta {
                last_run,
                files: self.snapshot.clone(),
            },
            entries: self
                .postings
                .iter()
                .map(|(key, files)| IndexEntry {
                    key: key.clone(),
                    files: files.values().cloned().collect(),
                })
                .collect(),
        }
    }

    /// Serialize and persist the index, replacing any existing document.
    ///
    /// The document is written to a temporary sibling file and renamed into
    /// place, so readers never see a half-written index.
    pub fn write(&self, index_path: &Path) -> Result<()> {
        let last_run = chrono::Utc::now().to_rfc3339();
        write_document(index_path, &self.to_document(last_run))
    }
}

/// Write a document as pretty-printed JSON with a trailing newline
pub fn write_document(index_path: &Path, doc: &IndexDocument) -> Result<()> {
    if let Some(parent) = index_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let tmp_path = temp_path(index_path);
    let result = (|| -> Result<()> {
        let mut file = BufWriter::new(
            File::create(&tmp_path)
                .with_context(|| format!("Failed to create {}", tmp_path.display()))?,
        );
        serde_json::to_writer_pretty(&mut file, doc).context("Failed to serialize index")?;
        file.write_all(b"\n")?;
        file.flush()?;
        file.get_ref().sync_all()?;
        fs::rename(&tmp_path, index_path)
            .with_context(|| format!("Failed to write index to {}", index_path.display()))?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

fn temp_path(index_path: &Path) -> PathBuf {
    let mut name = index_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    index_path.with_file_name(name)
}
