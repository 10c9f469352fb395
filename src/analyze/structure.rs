//! Sentence-structure statistics: terminal punctuation and sentence lengths.

use once_cell::sync::Lazy;
use regex::Regex;

static SENTENCE_SPLIT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence split regex"));

const PUNCTUATION: [char; 6] = ['.', '!', '?', ',', ':', ';'];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StructureStats {
    pub sentence_count: usize,
    pub has_punctuation: bool,
    /// Mean character length of sentence fragments; the full text length when
    /// there are no fragments at all.
    pub avg_sentence_length: f32,
}

/// Split on runs of `.`, `!`, `?`; trimmed empty fragments are discarded.
pub fn structure(text: &str) -> StructureStats {
    let fragments: Vec<&str> = SENTENCE_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .collect();

    let has_punctuation = text.chars().any(|c| PUNCTUATION.contains(&c));

    let avg_sentence_length = if fragments.is_empty() {
        text.chars().count() as f32
    } else {
        let total: usize = fragments.iter().map(|f| f.chars().count()).sum();
        total as f32 / fragments.len() as f32
    };

    StructureStats {
        sentence_count: fragments.len(),
        has_punctuation,
        avg_sentence_length,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_runs() {
        let s = structure("First sentence. Second one!! And a third?");
        assert_eq!(s.sentence_count, 3);
        assert!(s.has_punctuation);
    }

    #[test]
    fn no_terminal_punctuation_is_one_fragment() {
        let s = structure("just a plain line of words");
        assert_eq!(s.sentence_count, 1);
        assert!(!s.has_punctuation);
        assert!((s.avg_sentence_length - 26.0).abs() < 1e-6);
    }

    #[test]
    fn comma_counts_as_punctuation_but_not_sentence_break() {
        let s = structure("one, two, three");
        assert_eq!(s.sentence_count, 1);
        assert!(s.has_punctuation);
    }

    #[test]
    fn only_punctuation_yields_zero_sentences() {
        let s = structure("...!!!???");
        assert_eq!(s.sentence_count, 0);
        // Zero fragments → average falls back to the whole text length.
        assert!((s.avg_sentence_length - 9.0).abs() < 1e-6);
    }

    #[test]
    fn empty_text() {
        let s = structure("");
        assert_eq!(s.sentence_count, 0);
        assert!(!s.has_punctuation);
        assert_eq!(s.avg_sentence_length, 0.0);
    }

    #[test]
    fn average_length_in_chars_not_bytes() {
        // Cyrillic chars are 2 bytes each; the average must count chars.
        let s = structure("Привет. Пока.");
        assert_eq!(s.sentence_count, 2);
        assert!((s.avg_sentence_length - 5.0).abs() < 1e-6);
    }
}
