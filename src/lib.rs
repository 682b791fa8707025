//! # statusdex - Workspace ticket and keyword index
//!
//! statusdex finds which files of a status-reporting workspace (daily logs,
//! task data, per-client project data, generated reports) mention a ticket
//! reference or keyword, without rescanning the workspace on every query.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index`] - Extraction, the persisted inverted index, full and incremental builds
//! - [`query`] - Query parsing, shared scoring, indexed and direct-scan search
//! - [`output`] - Result formatting
//! - [`utils`] - Scanning, tokenizing, identifier grammars, configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use statusdex::index::{build_index, update_index};
//! use statusdex::query::{search_index, SearchOptions};
//! use std::path::Path;
//!
//! let ws = Path::new("/path/to/workspace");
//! build_index(ws).unwrap();
//!
//! // Later runs only re-read files whose mtime changed
//! let summary = update_index(ws).unwrap();
//! println!("{} changed, {} removed", summary.changed, summary.removed);
//!
//! for result in search_index(ws, "INC12345", &SearchOptions::default()).unwrap() {
//!     println!("{} ({}) {}", result.file, result.score, result.snippet);
//! }
//! ```
//!
//! ## Index format
//!
//! The index is a single pretty-printed JSON document holding a snapshot of
//! `path -> mtime` for every indexed file and a key-sorted list of entries.
//! Keys are uppercase structured identifiers (`INC12345`, `PTI2025-777`) or
//! lowercase free-text tokens. Incremental updates diff the snapshot against
//! the filesystem and re-extract only what changed.

pub mod index;
pub mod output;
pub mod query;
pub mod utils;
