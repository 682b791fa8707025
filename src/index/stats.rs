use crate::index::reader::IndexReader;
use crate::index::types::IndexConfig;
use crate::utils::identifiers::IdentifierSet;
use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Summary of a persisted index
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStats {
    pub index_path: PathBuf,
    pub last_run: String,
    pub file_count: usize,
    pub key_count: usize,
    /// Keys produced by identifier schemes, per scheme name
    pub identifier_keys: Vec<(String, usize)>,
    pub token_keys: usize,
    pub size_bytes: u64,
}

/// Gather statistics about a workspace index. Fails when there is no valid index.
pub fn collect_stats(root: &Path, config: &IndexConfig) -> Result<IndexStats> {
    let reader = IndexReader::open_workspace(root, config)?;
    let identifiers = IdentifierSet::new(&config.identifier_schemes)?;

    let mut per_scheme: Vec<(String, usize)> = config
        .identifier_schemes
        .iter()
        .map(|s| (s.name.clone(), 0))
        .collect();
    let mut token_keys = 0;

    for entry in &reader.doc.entries {
        match identifiers.scheme_of(&entry.key) {
            // Identifier keys are stored uppercase; tokens are lowercase
            Some(name) if entry.key.to_uppercase() == entry.key => {
                if let Some(slot) = per_scheme.iter_mut().find(|(n, _)| n == name) {
                    slot.1 += 1;
                }
            }
            _ => token_keys += 1,
        }
    }

    let size_bytes = std::fs::metadata(reader.index_path())
        .map(|m| m.len())
        .unwrap_or(0);

    Ok(IndexStats {
        index_path: reader.index_path().to_path_buf(),
        last_run: reader.last_run().to_string(),
        file_count: reader.file_count(),
        key_count: reader.key_count(),
        identifier_keys: per_scheme,
        token_keys,
        size_bytes,
    })
}

/// Display index statistics
pub fn show_stats(root: &Path, config: &IndexConfig) -> Result<()> {
    let stats = collect_stats(root, config)?;

    println!("Index Statistics");
    println!("================");
    println!();
    println!("Workspace:        {}", root.display());
    println!("Index location:   {}", stats.index_path.display());
    println!("Last run:         {}", stats.last_run);
    println!("Files:            {}", stats.file_count);
    println!("Keys:             {}", stats.key_count);
    println!();
    println!("Keys by kind:");
    for (name, count) in &stats.identifier_keys {
        println!("  {:15} {}", name, count);
    }
    println!("  {:15} {}", "token", stats.token_keys);
    println!();
    println!("Index size:       {}", format_size(stats.size_bytes));

    Ok(())
}

/// Format byte size to human readable
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::build::build_index;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_collect_stats() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("logs/daily")).unwrap();
        fs::write(dir.path().join("logs/daily/a.md"), "INC1 CHG2 deploy").unwrap();
        build_index(dir.path()).unwrap();

        let stats = collect_stats(dir.path(), &IndexConfig::default()).unwrap();
        assert_eq!(stats.file_count, 1);
        let count = |name: &str| {
            stats
                .identifier_keys
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, c)| *c)
        };
        assert_eq!(count("incident"), Some(1));
        assert_eq!(count("change"), Some(1));
        // inc1, chg2 (lowercase token forms) and deploy
        assert_eq!(stats.token_keys, 3);
        assert!(stats.size_bytes > 0);
    }

    #[test]
    fn test_stats_without_index_fails() {
        let dir = tempdir().unwrap();
        assert!(collect_stats(dir.path(), &IndexConfig::default()).is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(10), "10 bytes");
        assert_eq!(format_size(2048), "2.00 KB");
    }
}
