// src/analyze/mod.rs
//! Independent statistical analyzers feeding the quality scorer.
//!
//! Every function here is a pure total function of its input string: no I/O,
//! no shared state, safe to call concurrently.

pub mod entropy;
pub mod gibberish;
pub mod patterns;
pub mod structure;
pub mod words;

// Re-export convenient types.
pub use entropy::entropy;
pub use gibberish::is_gibberish;
pub use patterns::{patterns, PatternStats};
pub use structure::{structure, StructureStats};
pub use words::{extract_words, word_stats, WordStats};
