//! Rule-based detector for degenerate, non-linguistic text.
//!
//! The rules are deliberately cheap: vowel/consonant presence, the share of
//! one-letter tokens, repeated ultra-short tokens, and average word length.
//! Each rule alone is a weak signal; the quality scorer only spends a small
//! weight on the combined verdict.

use crate::analyze::words::extract_words;

/// Combined Cyrillic + Latin vowel set ("y" included for Latin).
const VOWELS: &str = "аеёиоуыэюяaeiouy";
/// Combined Cyrillic + Latin consonant set. "ь", "ъ" and "й" variants that
/// never carry a syllable on their own are left out of the Latin set's logic;
/// the Cyrillic set lists the standard consonant letters.
const CONSONANTS: &str = "бвгджзйклмнпрстфхцчшщbcdfghjklmnpqrstvwxz";

/// Returns true when the text is judged to be noise rather than language.
/// Texts under 10 characters are never flagged.
pub fn is_gibberish(text: &str) -> bool {
    let char_len = text.chars().count();
    if char_len < 10 {
        return false;
    }

    let lower = text.to_lowercase();
    let words = extract_words(text);

    // Rule a: almost no tokens and the stream lacks vowels or consonants
    // entirely ("пппппппппп", "ыыыыы ыыы").
    if words.len() < 3 {
        let has_vowel = lower.chars().any(|c| VOWELS.contains(c));
        let has_consonant = lower.chars().any(|c| CONSONANTS.contains(c));
        if !has_vowel || !has_consonant {
            return true;
        }
    }

    // Rule b: mostly one-letter tokens ("а б в г д е ж з").
    if !words.is_empty() {
        let very_short = words.iter().filter(|w| w.chars().count() < 2).count();
        if very_short as f32 / words.len() as f32 > 0.5 {
            return true;
        }
    }

    // Rule c: several distinct ultra-short tokens, each repeated over and
    // over ("ха ха ха хи хи хи хо хо хо хо").
    if words.len() > 5 {
        let mut counts: std::collections::HashMap<&str, usize> = std::collections::HashMap::new();
        for w in &words {
            if w.chars().count() <= 2 {
                *counts.entry(w.as_str()).or_insert(0) += 1;
            }
        }
        let heavy = counts.values().filter(|&&c| c > 3).count();
        if heavy > 2 {
            return true;
        }
    }

    // Rule d: a short unpunctuated stream of stubby tokens with no word long
    // enough to be real vocabulary.
    if char_len < 60 && !words.is_empty() {
        let total_len: usize = words.iter().map(|w| w.chars().count()).sum();
        let mean_len = total_len as f32 / words.len() as f32;
        let has_terminal = text.chars().any(|c| matches!(c, '.' | '!' | '?'));
        let max_len = words.iter().map(|w| w.chars().count()).max().unwrap_or(0);
        if mean_len < 3.5 && !has_terminal && max_len <= 5 {
            return true;
        }
    }

    false
}
