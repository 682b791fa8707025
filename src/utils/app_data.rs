use crate::index::types::IndexConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "statusdex";
const CONFIG_FILE: &str = "config.json";

/// Default number of search results
pub const DEFAULT_SEARCH_LIMIT: usize = 8;

/// Upper bound on the number of search results
pub const MAX_SEARCH_LIMIT: usize = 20;

/// Application configuration stored in the app data directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Indexer settings
    #[serde(default)]
    pub index: IndexConfig,

    /// Number of results returned when no limit is given
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,
}

fn default_search_limit() -> usize {
    DEFAULT_SEARCH_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            index: IndexConfig::default(),
            search_limit: default_search_limit(),
        }
    }
}

impl AppConfig {
    /// Load config from the app data directory, or return default if not found
    pub fn load() -> Result<Self> {
        let Some(config_path) = get_config_path() else {
            return Ok(Self::default());
        };

        if config_path.exists() {
            let content =
                fs::read_to_string(&config_path).context("Failed to read config file")?;
            let config: AppConfig =
                serde_json::from_str(&content).context("Failed to parse config file")?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

/// Get the path to the config file
pub fn get_config_path() -> Option<PathBuf> {
    get_app_data_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Get the application data directory
pub fn get_app_data_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join("Library").join("Application Support"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
    } else {
        // Linux/Unix: use XDG_CONFIG_HOME or ~/.config
        dirs::config_dir()
    };

    base.map(|b| b.join(APP_NAME))
}

/// Find the workspace root starting from a given path.
///
/// The nearest ancestor (or the start path itself) that already holds an index
/// wins. Otherwise the nearest one containing at least two of the configured
/// target directories is taken, so a client folder with its own `reports/`
/// is not mistaken for the workspace. Falls back to the start path when
/// nothing is found.
pub fn find_workspace_root(start_path: &Path, config: &IndexConfig) -> Result<PathBuf> {
    let start = start_path
        .canonicalize()
        .with_context(|| format!("Invalid path: {}", start_path.display()))?;

    if let Some(root) = start
        .ancestors()
        .find(|dir| dir.join(&config.index_path).is_file())
    {
        return Ok(root.to_path_buf());
    }

    let required = config.target_dirs.len().min(2);
    let root = start
        .ancestors()
        .find(|dir| required > 0 && target_dir_count(dir, config) >= required)
        .unwrap_or(start.as_path());
    Ok(root.to_path_buf())
}

fn target_dir_count(path: &Path, config: &IndexConfig) -> usize {
    config
        .target_dirs
        .iter()
        .filter(|d| path.join(d).is_dir())
        .count()
}

/// Location of the persisted index for a workspace
pub fn index_file_path(root: &Path, config: &IndexConfig) -> PathBuf {
    root.join(&config.index_path)
}

/// Remove the persisted index of a workspace. Returns whether a file existed.
pub fn remove_index(root: &Path, config: &IndexConfig) -> Result<bool> {
    let path = index_file_path(root, config);
    if path.exists() {
        fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        Ok(true)
    } else {
        Ok(false)
    }
}
