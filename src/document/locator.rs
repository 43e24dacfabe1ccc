//! Typed element locators
//!
//! A `Locator` describes one query against a `Document` without embedding a
//! query-language string. Each variant is matched in document order and the
//! first hit wins.

use serde::{Deserialize, Serialize};

/// Query describing which element a probe is looking for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locator {
    /// Element matching `selector` whose `attr` value contains `substring`
    AttributeContains {
        selector: String,
        attr: String,
        substring: String,
    },
    /// Element matching `selector` whose normalized text equals `value`,
    /// then `ascend` levels up the containment hierarchy
    ExactText {
        selector: String,
        value: String,
        ascend: usize,
    },
    /// Element matching `selector` whose text contains `substring`
    TextContains { selector: String, substring: String },
}

impl Locator {
    /// First hyperlink whose `href` contains `substring`
    #[must_use]
    pub fn href_contains(substring: impl Into<String>) -> Self {
        Self::AttributeContains {
            selector: "a".to_string(),
            attr: "href".to_string(),
            substring: substring.into(),
        }
    }

    /// Paragraph label with exactly `value` as its text, `ascend` levels up
    #[must_use]
    pub fn label(value: impl Into<String>, ascend: usize) -> Self {
        Self::ExactText {
            selector: "p".to_string(),
            value: value.into(),
            ascend,
        }
    }

    /// First paragraph whose text contains `substring`
    #[must_use]
    pub fn paragraph_containing(substring: impl Into<String>) -> Self {
        Self::TextContains {
            selector: "p".to_string(),
            substring: substring.into(),
        }
    }

    pub(crate) fn selector(&self) -> &str {
        match self {
            Self::AttributeContains { selector, .. }
            | Self::ExactText { selector, .. }
            | Self::TextContains { selector, .. } => selector,
        }
    }
}

/// Trim and collapse inner whitespace runs to a single space
///
/// Same result as XPath `normalize-space()`.
#[must_use]
pub fn normalize_space(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_space_trims_and_collapses() {
        assert_eq!(normalize_space("  Discord  "), "Discord");
        assert_eq!(normalize_space("\n\tOur \n  Website "), "Our Website");
        assert_eq!(normalize_space("   "), "");
    }

    #[test]
    fn constructors_pick_elements() {
        assert_eq!(Locator::href_contains("vk.com").selector(), "a");
        assert_eq!(Locator::label("Website", 2).selector(), "p");
        assert_eq!(Locator::paragraph_containing("@").selector(), "p");
    }
}
