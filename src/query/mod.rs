pub mod executor;
pub mod parser;
pub mod scan;
pub mod scorer;

pub use executor::{QueryExecutor, SearchOptions, search_index};
pub use parser::{Query, parse_query};
pub use scan::scan_search;
pub use scorer::{MatchKind, ScoreBoard, Scorer, ScoringWeights};
