// src/validator.rs
//! Top-level entry point: link/mention hard gate, length policy branches,
//! quality scoring, and threshold comparison.

use tracing::info;

use crate::analyze::word_stats;
use crate::config::GateConfig;
use crate::links::check_links_and_mentions;
use crate::scoring::score_text;

/// How many issues a rejection message enumerates before summarizing.
const MAX_LISTED_ISSUES: usize = 5;

/// Final verdict for a submitted text. `message` is empty when accepted and
/// is intended for direct display to the submitting user otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub accepted: bool,
    pub message: String,
}

impl ValidationResult {
    fn accepted() -> Self {
        Self {
            accepted: true,
            message: String::new(),
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            accepted: false,
            message,
        }
    }
}

// Dev logging gate: GATE_DEV_LOG=1 AND dev env (debug or SHUTTLE_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var("GATE_DEV_LOG").ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    matches!(
        std::env::var("SHUTTLE_ENV")
            .unwrap_or_default()
            .to_ascii_lowercase()
            .as_str(),
        "local" | "development" | "dev"
    )
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

pub(crate) fn truncate_vec<T: ToString>(v: &[T], max: usize) -> Vec<String> {
    v.iter().take(max).map(|x| x.to_string()).collect()
}

/// Minimal, anonymized dev logger for gate verdicts.
fn dev_log_verdict(event: &str, text: &str, issues: &[String], score: f32, threshold: f32) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(text);
    let issues_short = truncate_vec(issues, 5);
    // Never log raw text. Only hashed id + short lists.
    info!(
        target: "gate",
        %id, %score, %threshold, event,
        issues = ?issues_short
    );
}

/// Validate with the configured minimum score.
pub fn validate(text: &str, cfg: &GateConfig) -> ValidationResult {
    validate_with_threshold(text, cfg.min_score, cfg)
}

/// Validate `text` against an explicit minimum score.
///
/// The link/mention filter always wins: spam links and mentions are rejected
/// no matter how well the rest of the text scores. Very short texts (under
/// 20 chars) skip scoring and only need two words; texts between 20 and 60
/// chars face a raised threshold because the statistics are noisy there.
pub fn validate_with_threshold(text: &str, min_score: f32, cfg: &GateConfig) -> ValidationResult {
    let link_check = check_links_and_mentions(text);
    if !link_check.valid {
        dev_log_verdict("rejected_links", text, &[], 0.0, min_score);
        return ValidationResult::rejected(link_check.error);
    }

    let len = text.chars().count();
    let stats = word_stats(text);

    if len < 20 {
        if stats.word_count >= 2 {
            dev_log_verdict("accepted_short", text, &[], 100.0, min_score);
            return ValidationResult::accepted();
        }
        dev_log_verdict("rejected_short", text, &[], 0.0, min_score);
        return ValidationResult::rejected("Text must contain at least 2 words.".to_string());
    }

    let threshold = if len < 60 {
        min_score.max(cfg.short_text_min_score)
    } else {
        min_score
    };

    let report = score_text(text, cfg);
    if report.score < threshold {
        let mut message = format!(
            "Overall quality score: {:.1}/100 (minimum: {:.0})",
            report.score, threshold
        );
        for (i, issue) in report.issues.iter().take(MAX_LISTED_ISSUES).enumerate() {
            message.push_str(&format!("\n{}. {}", i + 1, issue));
        }
        if report.issues.len() > MAX_LISTED_ISSUES {
            message.push_str(&format!(
                "\n(+{} more)",
                report.issues.len() - MAX_LISTED_ISSUES
            ));
        }
        dev_log_verdict("rejected_score", text, &report.issues, report.score, threshold);
        return ValidationResult::rejected(message);
    }

    dev_log_verdict("accepted", text, &report.issues, report.score, threshold);
    ValidationResult::accepted()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> GateConfig {
        GateConfig::default()
    }

    #[test]
    fn one_word_short_text_is_rejected() {
        let r = validate("hello", &cfg());
        assert!(!r.accepted);
        assert!(r.message.contains("at least 2 words"), "got: {}", r.message);
    }

    #[test]
    fn two_word_short_text_is_accepted() {
        let r = validate("hi there", &cfg());
        assert!(r.accepted, "got: {}", r.message);
        assert!(r.message.is_empty());
    }

    #[test]
    fn link_gate_beats_everything_else() {
        // Perfectly fine prose, but it carries a mention.
        let r = validate("Our chat rules are simple and clear. Ask @admin for help.", &cfg());
        assert!(!r.accepted);
        assert!(r.message.contains("@admin"), "got: {}", r.message);
        assert!(
            !r.message.contains("quality score"),
            "link rejection must not mention scoring: {}",
            r.message
        );
    }

    #[test]
    fn midlength_text_faces_raised_threshold() {
        // 20..60 chars: even min_score = 0 is raised to 50.
        let mut zero = cfg();
        zero.min_score = 0.0;
        let junk = "aaaa aaaa aaaa aaaa aaaa aaaa aaaa";
        assert!(junk.chars().count() >= 20 && junk.chars().count() < 60);
        let r = validate(junk, &zero);
        assert!(!r.accepted, "repetitive junk must fail the raised threshold");
        assert!(r.message.contains("minimum: 50"), "got: {}", r.message);
    }

    #[test]
    fn rejection_message_enumerates_issues() {
        let junk = "aaaa aaaa aaaa aaaa aaaa aaaa aaaa";
        let r = validate(junk, &cfg());
        assert!(!r.accepted);
        assert!(
            r.message.starts_with("Overall quality score:"),
            "got: {}",
            r.message
        );
        assert!(r.message.contains("\n1. "), "got: {}", r.message);
    }

    #[test]
    fn repeated_word_spam_is_rejected() {
        let spam = "spam spam spam spam spam spam spam spam spam spam.";
        assert!(spam.chars().count() >= 20);
        let r = validate(spam, &cfg());
        assert!(!r.accepted, "repetition spam must be rejected");
    }

    #[test]
    fn coherent_paragraph_is_accepted() {
        let text = "These rules keep our chat friendly and useful. Treat every member \
                    with respect, even in heated debates. Advertising and unsolicited \
                    self-promotion are not welcome here. Moderators may remove messages \
                    that break these simple expectations.";
        let r = validate(text, &cfg());
        assert!(r.accepted, "got: {}", r.message);
    }

    #[test]
    fn validate_is_deterministic() {
        let text = "spam spam spam spam spam spam spam spam spam spam.";
        let a = validate(text, &cfg());
        let b = validate(text, &cfg());
        assert_eq!(a, b);
    }

    #[test]
    fn explicit_threshold_overrides_config() {
        let text = "A modest but honest pair of sentences. Nothing fancy here at all, really.";
        let relaxed = validate_with_threshold(text, 1.0, &cfg());
        let brutal = validate_with_threshold(text, 100.0, &cfg());
        assert!(relaxed.accepted, "got: {}", relaxed.message);
        assert!(!brutal.accepted, "a 100-point threshold must reject");
    }

    #[test]
    fn anon_hash_is_short_and_stable() {
        let a = anon_hash("some rules text");
        let b = anon_hash("some rules text");
        assert_eq!(a, b);
        assert_eq!(a.len(), 12);
        assert_ne!(a, anon_hash("other text"));
    }
}
