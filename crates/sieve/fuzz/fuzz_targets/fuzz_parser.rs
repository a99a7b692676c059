//! Fuzz target for the data parser and check pipeline.
//!
//! Malformed input must produce a load error or a report, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::Sieve;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let report = Sieve::new().check_str("fuzz.csv", content);
        if report.load_success {
            assert!(report.data_info.is_some());
        } else {
            assert!(report.checks.is_empty());
        }
    }
});
