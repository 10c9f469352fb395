//! Shannon character-entropy of a text sample.
//!
//! Low entropy means a repetitive, low-information character distribution
//! ("aaaaaa", "ololololol"); natural prose usually lands well above 3 bits.

use std::collections::BTreeMap;

/// Shannon entropy (bits) over the lower-cased character distribution.
///
/// Every character counts, including whitespace and punctuation. Returns
/// `0.0` for inputs shorter than 2 characters. Total function, no failure
/// modes.
///
/// Counts live in a `BTreeMap` so the float sum always folds in the same
/// order; f32 addition is not associative, and a hash-ordered sum drifts in
/// the last bits between calls.
pub fn entropy(text: &str) -> f32 {
    if text.chars().count() < 2 {
        return 0.0;
    }

    let lower = text.to_lowercase();
    let mut counts: BTreeMap<char, usize> = BTreeMap::new();
    let mut total = 0usize;
    for ch in lower.chars() {
        *counts.entry(ch).or_insert(0) += 1;
        total += 1;
    }

    let total = total as f32;
    counts
        .values()
        .map(|&n| {
            let p = n as f32 / total;
            -p * p.log2()
        })
        .sum()
}
