pub mod build;
pub mod extract;
pub mod reader;
pub mod snippet;
pub mod stats;
pub mod types;
pub mod writer;

pub use build::{build_index, update_index};
pub use reader::IndexReader;
pub use types::*;
pub use writer::IndexWriter;
