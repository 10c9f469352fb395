//! Character-class composition and keyboard-mashing detection.

use crate::analyze::entropy::entropy;

/// Physical key-adjacency runs on QWERTY and ЙЦУКЕН layouts. A literal
/// substring hit on the lower-cased text is enough to flag the sample.
const KEYBOARD_SEQUENCES: [&str; 11] = [
    "qwerty",
    "qwertyuiop",
    "asdf",
    "asdfgh",
    "zxcv",
    "zxcvbn",
    "йцукен",
    "фыва",
    "ячсми",
    "йцуке",
    "фывап",
];

/// Shorter runs, only consulted for texts longer than 5 characters to avoid
/// flagging tiny inputs on a 3-4 letter coincidence.
const SHORT_KEYBOARD_SEQUENCES: [&str; 6] = ["qwerty", "asdf", "zxcv", "йцук", "фыва", "ячс"];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternStats {
    /// Alphabetic characters / total characters, in [0, 1]; 0 for empty text.
    pub letter_ratio: f32,
    /// Character entropy in bits (see [`entropy`]).
    pub char_diversity: f32,
    pub has_keyboard_pattern: bool,
}

pub fn patterns(text: &str) -> PatternStats {
    let total = text.chars().count();
    let letter_ratio = if total == 0 {
        0.0
    } else {
        let letters = text.chars().filter(|c| c.is_alphabetic()).count();
        letters as f32 / total as f32
    };

    PatternStats {
        letter_ratio,
        char_diversity: entropy(text),
        has_keyboard_pattern: has_keyboard_pattern(text, total),
    }
}

fn has_keyboard_pattern(text: &str, char_len: usize) -> bool {
    let lower = text.to_lowercase();
    if KEYBOARD_SEQUENCES.iter().any(|seq| lower.contains(seq)) {
        return true;
    }
    char_len > 5
        && SHORT_KEYBOARD_SEQUENCES
            .iter()
            .any(|seq| lower.contains(seq))
}
