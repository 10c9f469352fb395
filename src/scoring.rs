// src/scoring.rs
//! Weighted multi-factor quality score in [0, 100].
//!
//! Each factor either applies its full flat deduction (non-compliant) or
//! replaces that deduction with partial credit scaled by how far the metric
//! sits above its minimum. The arithmetic is deliberately written as
//! `score += partial - weight` — replacing the deduction, not stacking on
//! top of it — because boundary behavior near the thresholds depends on it.

use crate::analyze::{entropy, is_gibberish, patterns, structure, word_stats};
use crate::config::GateConfig;

/// Texts shorter than this bypass scoring entirely.
const SCORING_MIN_LEN: usize = 10;

/// Result of the quality analysis: the clamped score plus one human-readable
/// line per flat deduction, in evaluation order.
#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub score: f32,
    pub issues: Vec<String>,
}

/// Score a text sample against the configured thresholds.
pub fn score_text(text: &str, cfg: &GateConfig) -> QualityReport {
    let len = text.chars().count();
    if len < SCORING_MIN_LEN {
        return QualityReport {
            score: 100.0,
            issues: Vec::new(),
        };
    }

    let mut score = 100.0f32;
    let mut issues: Vec<String> = Vec::new();
    let w = &cfg.weights;

    // 1) Character entropy — only meaningful once there is enough text.
    if len > 20 {
        let min_entropy = if len > 50 {
            cfg.min_entropy_long
        } else {
            cfg.min_entropy
        };
        let h = entropy(text);
        if h < min_entropy {
            score -= w.entropy;
            issues.push(format!("low entropy: {h:.2} (min {min_entropy:.1})"));
        } else {
            let span = (cfg.entropy_ceiling - min_entropy).max(1e-6);
            let normalized = ((h - min_entropy) / span).clamp(0.0, 1.0);
            score += normalized * w.entropy - w.entropy;
        }
    }

    // 2) Word diversity + repetition.
    let stats = word_stats(text);
    if stats.word_count > 0 {
        if stats.unique_ratio < cfg.min_unique_word_ratio {
            score -= w.word_diversity;
            issues.push(format!(
                "low word diversity: {:.2} (min {:.2})",
                stats.unique_ratio, cfg.min_unique_word_ratio
            ));
        } else {
            let span = (1.0 - cfg.min_unique_word_ratio).max(1e-6);
            let unique_score =
                (stats.unique_ratio - cfg.min_unique_word_ratio) / span * w.word_diversity;
            score += unique_score - w.word_diversity;
        }

        if stats.max_repetition_ratio > cfg.max_repetition_ratio {
            score -= w.repetition;
            issues.push(format!(
                "excessive word repetition: {:.2} (max {:.2})",
                stats.max_repetition_ratio, cfg.max_repetition_ratio
            ));
        }
    }

    // 3) Sentence structure + punctuation presence.
    if len > 20 {
        let st = structure(text);
        let min_sentences = if len <= 50 { 1 } else { 2 };
        if st.sentence_count < min_sentences {
            score -= w.structure;
            issues.push(format!(
                "too few sentences: {} (min {min_sentences})",
                st.sentence_count
            ));
        } else {
            let sentence_score =
                (((st.sentence_count - min_sentences + 1) as f32) / 5.0 * w.structure)
                    .min(w.structure);
            score += sentence_score - w.structure;
        }

        if len > 30 && !st.has_punctuation {
            let penalty = if len < 60 {
                w.punctuation_short
            } else {
                w.punctuation_long
            };
            score -= penalty;
            issues.push("missing punctuation".to_string());
        }
    }

    // 4) Character composition + keyboard mashing.
    let ps = patterns(text);
    if ps.letter_ratio < cfg.min_letter_ratio {
        score -= w.letters;
        issues.push(format!(
            "low letter ratio: {:.2} (min {:.2})",
            ps.letter_ratio, cfg.min_letter_ratio
        ));
    } else {
        let span = (1.0 - cfg.min_letter_ratio).max(1e-6);
        let letter_score = (ps.letter_ratio - cfg.min_letter_ratio) / span * w.letters;
        score += letter_score - w.letters;
    }
    if ps.has_keyboard_pattern {
        score -= w.keyboard;
        issues.push("keyboard-mashing pattern detected".to_string());
    }

    // 5) Gibberish verdict.
    if is_gibberish(text) {
        score -= w.gibberish;
        issues.push("text looks like gibberish".to_string());
    }

    QualityReport {
        score: score.clamp(0.0, 100.0),
        issues,
    }
}
