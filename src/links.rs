// src/links.rs
//! Hard gate for `@mention`s and URLs in submitted text.
//!
//! Two domains are allowlisted for long-form rule attachments; everything
//! else that looks like a link (explicit scheme, `www.` prefix, or a bare
//! domain token) is rejected. Mention detection works around two email
//! shapes so `support@example.com` never trips the gate.

use once_cell::sync::Lazy;
use regex::Regex;

/// URL hosts exempt from the link rejection rule.
pub const ALLOWED_DOMAINS: [&str; 2] = ["telegra.ph", "teletype.in"];

/// How many offending tokens a rejection message lists before summarizing.
const MAX_LISTED: usize = 3;

static ALLOWED_URL_RE: Lazy<Regex> = Lazy::new(|| {
    let alt = ALLOWED_DOMAINS
        .iter()
        .map(|d| regex::escape(d))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)(?:https?://)?(?:www\.)?(?:{alt})(?:/\S*)?"))
        .expect("allowlisted url regex")
});

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@\w+").expect("mention regex"));

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)https?://\S+").expect("http url regex"));

static WWW_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bwww\.\S+").expect("www url regex"));

static BARE_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[a-z0-9][a-z0-9-]*(?:\.[a-z0-9][a-z0-9-]*)*\.[a-z]{2,}\b")
        .expect("bare domain regex")
});

/// Verdict of the link/mention gate. `error` is empty when `valid` is true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCheck {
    pub valid: bool,
    pub error: String,
}

impl LinkCheck {
    fn ok() -> Self {
        Self {
            valid: true,
            error: String::new(),
        }
    }

    fn reject(error: String) -> Self {
        Self {
            valid: false,
            error,
        }
    }
}

/// Scan `text` for disallowed mentions and links.
///
/// Allowlisted-domain URLs are located first; their character ranges are
/// excluded from mention detection so `https://telegra.ph/@author-page`
/// cannot be misread as a mention. Mentions are reported before links.
pub fn check_links_and_mentions(text: &str) -> LinkCheck {
    let protected: Vec<(usize, usize)> = ALLOWED_URL_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mentions = collect_mentions(text, &protected);
    if !mentions.is_empty() {
        return LinkCheck::reject(format!(
            "Mentions of users or channels are not allowed: {}",
            list_with_overflow(&mentions)
        ));
    }

    let urls = collect_disallowed_urls(text);
    if !urls.is_empty() {
        return LinkCheck::reject(format!(
            "Links are not allowed: {}. Allowed domains: {}",
            list_with_overflow(&urls),
            ALLOWED_DOMAINS.join(", ")
        ));
    }

    LinkCheck::ok()
}

fn collect_mentions(text: &str, protected: &[(usize, usize)]) -> Vec<String> {
    let mut mentions = Vec::new();
    for m in MENTION_RE.find_iter(text) {
        if protected
            .iter()
            .any(|&(s, e)| m.start() >= s && m.start() < e)
        {
            continue;
        }
        // `user@host` — the '@' belongs to an email local part.
        if let Some(prev) = text[..m.start()].chars().next_back() {
            if prev == '@' || prev.is_alphanumeric() {
                continue;
            }
        }
        // `@example.com` — word chars right after a dot look like an email
        // domain, not a mention.
        let mut rest = text[m.end()..].chars();
        if rest.next() == Some('.') {
            if let Some(next) = rest.next() {
                if next.is_alphanumeric() || next == '_' {
                    continue;
                }
            }
        }
        mentions.push(m.as_str().to_string());
    }
    mentions
}

fn collect_disallowed_urls(text: &str) -> Vec<String> {
    let mut urls: Vec<String> = Vec::new();
    let mut push_unique = |token: String| {
        if !urls.contains(&token) {
            urls.push(token);
        }
    };

    // Pass 1: explicit scheme.
    for m in HTTP_URL_RE.find_iter(text) {
        let token = strip_trailing_punctuation(m.as_str());
        if token.is_empty() || is_allowlisted(token) {
            continue;
        }
        push_unique(token.to_string());
    }

    // Pass 2: `www.` prefix without a scheme.
    for m in WWW_URL_RE.find_iter(text) {
        let token = strip_trailing_punctuation(m.as_str());
        if token.is_empty() || is_allowlisted(token) {
            continue;
        }
        push_unique(token.to_string());
    }

    // Pass 3: bare domain-looking tokens. The preceding-character rules keep
    // this pass from re-reporting hosts already caught above (preceded by
    // '/') and from flagging email domains (preceded by '@').
    for m in BARE_DOMAIN_RE.find_iter(text) {
        if m.as_str().chars().count() < 8 {
            continue;
        }
        if let Some(prev) = text[..m.start()].chars().next_back() {
            if prev == '@' || prev == '/' {
                continue;
            }
        }
        let token = strip_trailing_punctuation(m.as_str());
        if token.is_empty() || is_allowlisted(token) {
            continue;
        }
        push_unique(token.to_string());
    }

    urls
}

fn is_allowlisted(token: &str) -> bool {
    let lower = token.to_lowercase();
    ALLOWED_DOMAINS.iter().any(|d| lower.contains(d))
}

fn strip_trailing_punctuation(token: &str) -> &str {
    token.trim_end_matches(['.', ',', '!', '?', ';', ':', ')', ']'])
}

fn list_with_overflow(items: &[String]) -> String {
    let shown = items
        .iter()
        .take(MAX_LISTED)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    if items.len() > MAX_LISTED {
        format!("{shown} (+{} more)", items.len() - MAX_LISTED)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes() {
        let r = check_links_and_mentions("Be polite. No spam, no insults.");
        assert!(r.valid);
        assert!(r.error.is_empty());
    }

    #[test]
    fn mention_is_rejected_and_named() {
        let r = check_links_and_mentions("Contact @spammer for details.");
        assert!(!r.valid);
        assert!(r.error.contains("@spammer"), "got: {}", r.error);
    }

    #[test]
    fn email_is_not_a_mention() {
        let r = check_links_and_mentions("Напишите на support@example.com");
        assert!(r.valid, "email flagged as mention: {}", r.error);
    }

    #[test]
    fn double_at_is_not_a_mention() {
        let r = check_links_and_mentions("weird token here only: @@notamention here");
        // The second '@' is preceded by '@', the first has no word chars.
        assert!(r.valid, "got: {}", r.error);
    }

    #[test]
    fn mention_overflow_is_summarized() {
        let r = check_links_and_mentions("@a1 @b2 @c3 @d4 @e5 spam wave");
        assert!(!r.valid);
        assert!(r.error.contains("(+2 more)"), "got: {}", r.error);
        assert!(r.error.contains("@a1"));
        assert!(!r.error.contains("@d4"));
    }

    #[test]
    fn http_link_is_rejected_with_allowlist_hint() {
        let r = check_links_and_mentions("Visit http://malicious-site.example for more");
        assert!(!r.valid);
        assert!(r.error.contains("malicious-site.example"), "got: {}", r.error);
        assert!(r.error.contains("telegra.ph"));
        assert!(r.error.contains("teletype.in"));
    }

    #[test]
    fn www_link_is_rejected() {
        let r = check_links_and_mentions("ads at www.buy-now-cheap.shop today");
        assert!(!r.valid);
        assert!(r.error.contains("www.buy-now-cheap.shop"), "got: {}", r.error);
    }

    #[test]
    fn bare_domain_is_rejected() {
        let r = check_links_and_mentions("find us on superspam.example please");
        assert!(!r.valid);
        assert!(r.error.contains("superspam.example"), "got: {}", r.error);
    }

    #[test]
    fn short_bare_token_is_ignored() {
        // "ab.cd" is domain-shaped but under the 8-char floor.
        let r = check_links_and_mentions("shorthand ab.cd stays fine here");
        assert!(r.valid, "got: {}", r.error);
    }

    #[test]
    fn allowlisted_links_pass() {
        for text in [
            "Подробности: https://telegra.ph/some-article-12-25",
            "See teletype.in/@our-channel for the long version",
            "http://www.telegra.ph/page and nothing else",
        ] {
            let r = check_links_and_mentions(text);
            assert!(r.valid, "allowlisted link rejected ({text}): {}", r.error);
        }
    }

    #[test]
    fn scheme_and_bare_passes_do_not_double_report() {
        let r = check_links_and_mentions("go to https://evil-tracker.example now");
        assert!(!r.valid);
        // The bare-domain pass sees the host preceded by '/' and skips it.
        let first = r.error.find("evil-tracker.example").unwrap();
        assert!(r.error[first + 1..].find("evil-tracker.example").is_none());
    }

    #[test]
    fn email_domain_is_not_a_bare_link() {
        let r = check_links_and_mentions("Write to longname@business-mail.example with questions");
        assert!(r.valid, "got: {}", r.error);
    }

    #[test]
    fn trailing_punctuation_is_stripped() {
        let r = check_links_and_mentions("see http://spam-landing.example, thanks");
        assert!(!r.valid);
        assert!(r.error.contains("http://spam-landing.example"), "got: {}", r.error);
        assert!(!r.error.contains("example,"), "got: {}", r.error);
    }
}
