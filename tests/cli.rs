//! Tests that drive the `statusdex` binary.

mod common;

use common::{workspace, write_file};
use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};

const T0: u64 = 1_769_342_400;

fn statusdex(root: &Path, home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_statusdex"))
        .args(args)
        .current_dir(root)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run statusdex")
}

fn json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "statusdex failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn test_index_then_search() {
    let ws = workspace();
    let home = tempfile::tempdir().unwrap();
    write_file(ws.path(), "logs/daily/2026-01-25.md", "INC12345 falhou em produção.", T0);

    let summary = json(&statusdex(ws.path(), home.path(), &["index", "--json"]));
    assert_eq!(summary["fileCount"], 1);
    assert!(summary["keyCount"].as_u64().unwrap() >= 2);

    let results = json(&statusdex(ws.path(), home.path(), &["search", "INC12345", "--json"]));
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["file"], "logs/daily/2026-01-25.md");
    assert_eq!(results[0]["date"], "2026-01-25");
    assert_eq!(results[0]["score"], 112);
}

#[test]
fn test_search_refresh_builds_missing_index() {
    let ws = workspace();
    let home = tempfile::tempdir().unwrap();
    write_file(ws.path(), "reports/weekly.md", "CHG777 aberto.", T0);

    let results = json(&statusdex(
        ws.path(),
        home.path(),
        &["search", "CHG777", "--refresh", "--json"],
    ));
    assert_eq!(results[0]["file"], "reports/weekly.md");
    assert!(ws.path().join("data/index/workspace-index.json").is_file());
}

#[test]
fn test_update_reports_counts() {
    let ws = workspace();
    let home = tempfile::tempdir().unwrap();
    let file = write_file(ws.path(), "logs/daily/2026-01-25.md", "INC1", T0);
    json(&statusdex(ws.path(), home.path(), &["index", "--json"]));

    std::fs::remove_file(file).unwrap();
    let summary = json(&statusdex(ws.path(), home.path(), &["update", "--json"]));
    assert_eq!(summary["removed"], 1);
    assert_eq!(summary["changed"], 0);
    assert_eq!(summary["fileCount"], 0);
}

#[test]
fn test_scan_needs_no_index() {
    let ws = workspace();
    let home = tempfile::tempdir().unwrap();
    write_file(ws.path(), "data/tasks/task-log.json", "PTI2025-777 pendente", T0);

    let results = json(&statusdex(
        ws.path(),
        home.path(),
        &["scan", "PTI2025-777", "--json", "-l", "3"],
    ));
    assert_eq!(results[0]["file"], "data/tasks/task-log.json");
    assert!(!ws.path().join("data/index").exists());
}

#[test]
fn test_remove_deletes_index() {
    let ws = workspace();
    let home = tempfile::tempdir().unwrap();
    write_file(ws.path(), "logs/daily/2026-01-25.md", "INC1", T0);
    json(&statusdex(ws.path(), home.path(), &["index", "--json"]));

    let output = statusdex(ws.path(), home.path(), &["remove"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Removed index"));
    assert!(!ws.path().join("data/index/workspace-index.json").exists());
}

#[test]
fn test_search_requires_query() {
    let ws = workspace();
    let home = tempfile::tempdir().unwrap();
    let output = statusdex(ws.path(), home.path(), &["search"]);
    assert!(!output.status.success());
}
