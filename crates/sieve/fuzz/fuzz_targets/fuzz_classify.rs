//! Fuzz target for value classification and column inference.
//!
//! Regex-based date detection must not crash on pathological input, and a
//! value's classification must satisfy its own type's grammar.

#![no_main]

use libfuzzer_sys::fuzz_target;
use sieve::inference::{classifier, matches_type};
use sieve::{Classification, ColumnInferencer};

fuzz_target!(|data: &[u8]| {
    if data.len() > 10_000 {
        return;
    }

    if let Ok(content) = std::str::from_utf8(data) {
        let class = classifier::classify(content);
        if class != Classification::Text {
            assert!(matches_type(content, class.data_type()));
        }

        // Split into a column so inference sees mixed values
        let values: Vec<(usize, &str)> = content
            .split(',')
            .filter(|v| !v.trim().is_empty())
            .enumerate()
            .collect();
        let analysis = ColumnInferencer::new().infer(&values);
        assert_eq!(analysis.total_values(), values.len());
    }
});
