//! Utility functions and data structures.
//!
//! This module provides shared utilities used throughout statusdex:
//!
//! ## Modules
//!
//! - [`app_data`] - Configuration loading and workspace/index locations
//! - [`identifiers`] - Structured identifier grammars (ticket, incident, change codes)
//! - [`scan`] - Workspace file discovery
//! - [`tokenizer`] - Free-text token extraction for content and queries
//!
//! ## Key Functions
//!
//! ```no_run
//! use statusdex::utils::{extract_content_tokens, tokenize_query};
//!
//! // First occurrence of each distinct token, capped at 500
//! let hits = extract_content_tokens("Deploy falhou no api-gateway", 500);
//! // Keys: ["deploy", "falhou", "api-gateway"]
//!
//! let tokens = tokenize_query("deploy db");
//! // Returns: ["deploy", "db"]
//! ```

pub mod app_data;
pub mod identifiers;
pub mod progress;
pub mod scan;
pub mod tokenizer;

pub use app_data::*;
pub use identifiers::*;
pub use scan::*;
pub use tokenizer::*;
