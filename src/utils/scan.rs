//! Workspace file discovery.

use crate::index::types::{FileRecord, IndexConfig, MtimeMs};
use ignore::WalkBuilder;
use std::fs::Metadata;
use std::path::{Component, Path};
use std::time::UNIX_EPOCH;

/// Enumerate indexable files under the configured target directories.
///
/// Missing directories and unreadable entries are skipped. Results are sorted
/// by relative path so every run sees files in the same order.
pub fn scan_workspace(root: &Path, config: &IndexConfig) -> Vec<FileRecord> {
    let mut records = Vec::new();
    let index_rel = relative_path(root, &root.join(&config.index_path));

    for dir in &config.target_dirs {
        let dir_path = root.join(dir);
        if !dir_path.is_dir() {
            tracing::debug!(path = %dir_path.display(), "target directory absent");
            continue;
        }

        // Generated reports are often git-ignored, so no filters apply;
        // hidden files are visible too
        let walker = WalkBuilder::new(&dir_path)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let path = entry.path();
            if !has_allowed_extension(path, &config.extensions) {
                continue;
            }

            let Some(rel_path) = relative_path(root, path) else {
                continue;
            };
            // The index never indexes itself
            if index_rel.as_deref() == Some(rel_path.as_str()) {
                continue;
            }

            let (mtime_ms, size) = match entry.metadata() {
                Ok(meta) => match mtime_ms(&meta) {
                    Some(m) => (m, meta.len()),
                    None => continue,
                },
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "skipping file without metadata");
                    continue;
                }
            };

            records.push(FileRecord {
                abs_path: path.to_path_buf(),
                rel_path,
                mtime_ms,
                size,
            });
        }
    }

    records.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
    records.dedup_by(|a, b| a.rel_path == b.rel_path);
    records
}

fn has_allowed_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|allowed| *allowed == ext)
        })
        .unwrap_or(false)
}

/// Workspace-relative path with `/` separators
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Modification time in milliseconds since the epoch
pub fn mtime_ms(meta: &Metadata) -> Option<MtimeMs> {
    meta.modified()
        .ok()?
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|d| d.as_millis() as MtimeMs)
}
