//! Shared helpers for workspace integration tests.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, UNIX_EPOCH};
use tempfile::TempDir;

/// Empty workspace with the standard target directories
pub fn workspace() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp workspace");
    for sub in ["logs/daily", "data/tasks", "data/projects", "reports"] {
        fs::create_dir_all(dir.path().join(sub)).expect("Failed to create target dir");
    }
    dir
}

/// Write a file relative to the workspace root with a fixed mtime (seconds)
pub fn write_file(root: &Path, rel: &str, content: &str, mtime_secs: u64) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir");
    }
    fs::write(&path, content).expect("Failed to write fixture");
    set_mtime(&path, mtime_secs);
    path
}

/// Force a file's modification time so staleness checks do not depend on clock resolution
pub fn set_mtime(path: &Path, mtime_secs: u64) {
    let file = fs::OpenOptions::new()
        .write(true)
        .open(path)
        .expect("Failed to open fixture");
    file.set_modified(UNIX_EPOCH + Duration::from_secs(mtime_secs))
        .expect("Failed to set mtime");
}
