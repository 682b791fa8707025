#![no_main]

use libfuzzer_sys::fuzz_target;
use statusdex::index::extract::extract_hits;
use statusdex::index::snippet::build_snippet;
use statusdex::index::types::IndexConfig;
use statusdex::utils::IdentifierSet;

fuzz_target!(|data: &str| {
    // Every hit offset must yield a snippet without slicing through a char
    let config = IndexConfig::default();
    let identifiers = IdentifierSet::default();
    if let Some(hits) = extract_hits(data, &config, &identifiers) {
        for hit in hits.iter().take(64) {
            let _ = build_snippet(data, Some((hit.index, hit.len)));
        }
    }
    let _ = build_snippet(data, None);
});
