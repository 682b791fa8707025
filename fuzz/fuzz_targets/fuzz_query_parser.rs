#![no_main]

use libfuzzer_sys::fuzz_target;
use statusdex::utils::IdentifierSet;

fuzz_target!(|data: &str| {
    // Query parsing must not panic on arbitrary input
    let _ = statusdex::query::parse_query(data, &IdentifierSet::default());
});
