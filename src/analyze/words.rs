//! Word-level diversity statistics.
//!
//! Words are maximal runs of Cyrillic/Latin letters, matched case-insensitively
//! over the lower-cased input. Digits, punctuation, and symbols never belong to
//! a word. Only these two alphabets are recognized by the gate.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[а-яёa-z]+\b").expect("word regex"));

/// Diversity metrics over the extracted word stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordStats {
    /// distinct words / total words, in [0, 1].
    pub unique_ratio: f32,
    /// occurrences of the most frequent word / total words, in [0, 1].
    pub max_repetition_ratio: f32,
    pub word_count: usize,
}

/// Extract lower-cased Cyrillic/Latin words in document order.
pub fn extract_words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Compute word-diversity stats for a text sample.
///
/// A sample with no recognizable words reports `unique_ratio = 0` and
/// `max_repetition_ratio = 1` so downstream scoring treats it as maximally
/// repetitive rather than dividing by zero.
pub fn word_stats(text: &str) -> WordStats {
    let words = extract_words(text);
    if words.is_empty() {
        return WordStats {
            unique_ratio: 0.0,
            max_repetition_ratio: 1.0,
            word_count: 0,
        };
    }

    let total = words.len();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for w in &words {
        *counts.entry(w.as_str()).or_insert(0) += 1;
    }
    let distinct = counts.len();
    let max_count = counts.values().copied().max().unwrap_or(0);

    WordStats {
        unique_ratio: distinct as f32 / total as f32,
        max_repetition_ratio: max_count as f32 / total as f32,
        word_count: total,
    }
}
