use crate::index::extract::read_record;
use crate::index::reader::load_document;
use crate::index::types::{BuildSummary, FileRecord, IndexConfig, UpdateSummary};
use crate::index::writer::IndexWriter;
use crate::utils::progress::{ProgressBar, ProgressStyle};
use crate::utils::{find_workspace_root, index_file_path, scan_workspace};
use anyhow::Result;
use std::collections::HashSet;
use std::path::Path;

/// Read a file and merge its hits. Over-limit files are skipped without
/// being read; unreadable files are skipped.
fn index_file(writer: &mut IndexWriter, record: &FileRecord) -> bool {
    let Some(text) = read_record(record, writer.config()) else {
        return false;
    };
    writer.add_file(record, &text)
}

fn progress_bar(len: usize, enabled: bool, message: &'static str) -> Option<ProgressBar> {
    if !enabled {
        return None;
    }
    let pb = ProgressBar::new(len as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░  "));
    }
    pb.set_message(message);
    Some(pb)
}

/// Build the search index from scratch
pub fn build_index(root: &Path) -> Result<BuildSummary> {
    build_index_with_config(root, &IndexConfig::default(), false)
}

/// Build the search index from scratch with explicit configuration
pub fn build_index_with_config(
    root: &Path,
    config: &IndexConfig,
    progress: bool,
) -> Result<BuildSummary> {
    let records = scan_workspace(root, config);
    let mut writer = IndexWriter::new(config.clone())?;

    let pb = progress_bar(records.len(), progress, "Indexing files...");
    let mut indexed = 0;
    for record in &records {
        if index_file(&mut writer, record) {
            indexed += 1;
        }
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    writer.set_snapshot(&records);

    let index_path = index_file_path(root, config);
    writer.write(&index_path)?;

    tracing::info!(
        files = records.len(),
        indexed,
        keys = writer.key_count(),
        path = %index_path.display(),
        "index built"
    );

    Ok(BuildSummary {
        index_path,
        file_count: writer.file_count(),
        key_count: writer.key_count(),
    })
}

/// Incrementally update the index
pub fn update_index(root: &Path) -> Result<UpdateSummary> {
    update_index_with_config(root, &IndexConfig::default(), false)
}

/// Incrementally update the index with explicit configuration.
///
/// Only files whose mtime changed since the last snapshot (or that are new)
/// are re-extracted; files gone from the workspace are dropped. A missing or
/// unusable index falls back to a full rebuild.
pub fn update_index_with_config(
    root: &Path,
    config: &IndexConfig,
    progress: bool,
) -> Result<UpdateSummary> {
    let index_path = index_file_path(root, config);

    let Some(doc) = load_document(&index_path) else {
        tracing::info!(path = %index_path.display(), "no usable index, rebuilding");
        let summary = build_index_with_config(root, config, progress)?;
        return Ok(UpdateSummary {
            index_path: summary.index_path,
            file_count: summary.file_count,
            key_count: summary.key_count,
            changed: summary.file_count,
            removed: 0,
        });
    };

    let records = scan_workspace(root, config);
    let mut writer = IndexWriter::from_document(config.clone(), doc)?;

    let current: HashSet<&str> = records.iter().map(|r| r.rel_path.as_str()).collect();
    let removed: Vec<String> = writer
        .snapshot()
        .keys()
        .filter(|path| !current.contains(path.as_str()))
        .cloned()
        .collect();
    let changed: Vec<&FileRecord> = records
        .iter()
        .filter(|r| writer.snapshot().get(&r.rel_path) != Some(&r.mtime_ms))
        .collect();

    for path in &removed {
        writer.remove_path(path);
    }

    let pb = progress_bar(changed.len(), progress && !changed.is_empty(), "Updating files...");
    for record in &changed {
        writer.remove_path(&record.rel_path);
        index_file(&mut writer, record);
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
    }
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    writer.set_snapshot(&records);
    writer.write(&index_path)?;

    tracing::info!(
        changed = changed.len(),
        removed = removed.len(),
        keys = writer.key_count(),
        path = %index_path.display(),
        "index updated"
    );

    Ok(UpdateSummary {
        index_path,
        file_count: writer.file_count(),
        key_count: writer.key_count(),
        changed: changed.len(),
        removed: removed.len(),
    })
}

/// Update the index of the workspace containing `start_path`
pub fn update_index_auto(start_path: &Path, config: &IndexConfig, progress: bool) -> Result<UpdateSummary> {
    let root = find_workspace_root(start_path, config)?;
    update_index_with_config(&root, config, progress)
}

/// Build the index of the workspace containing `start_path`
pub fn build_index_auto(start_path: &Path, config: &IndexConfig, progress: bool) -> Result<BuildSummary> {
    let root = find_workspace_root(start_path, config)?;
    build_index_with_config(&root, config, progress)
}
