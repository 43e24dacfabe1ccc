//! Best-effort email address matching

use once_cell::sync::Lazy;
use regex::Regex;

/// Lowercase `local@domain.tld` shape; the source text is not case-folded
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-z0-9.\-+_]+@[a-z0-9.\-+_]+\.[a-z]+").expect("Invalid email regex")
});

/// First email-shaped substring of `text`
#[must_use]
pub fn find_email(text: &str) -> Option<&str> {
    EMAIL_PATTERN.find(text).map(|m| m.as_str())
}
