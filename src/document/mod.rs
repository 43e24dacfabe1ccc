//! Parsed page snapshots and element lookup.
//!
//! A `Document` is the HTML captured from a loaded page plus the URL it was
//! loaded from. Lookups are read-only and return `Option`: a missing element,
//! a bad selector, or an absent attribute are all just `None`.

pub mod locator;

pub use locator::{Locator, normalize_space};

use ego_tree::NodeRef;
use ego_tree::iter::Edge;
use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Attributes whose values are URLs and get resolved against the page URL
const URL_ATTRIBUTES: [&str; 2] = ["href", "src"];

/// Elements rendered on their own line
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "footer", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "nav", "ol", "p", "pre", "section", "table",
    "td", "th", "tr", "ul",
];

/// Read-only snapshot of a loaded page
pub struct Document {
    html: Html,
    base_url: Option<Url>,
}

impl Document {
    /// Parse page markup.
    ///
    /// `base_url` is the address the page was served from; relative link
    /// targets are resolved against it. An unparsable base is ignored.
    #[must_use]
    pub fn parse(markup: &str, base_url: Option<&str>) -> Self {
        Self {
            html: Html::parse_document(markup),
            base_url: base_url.and_then(|u| Url::parse(u).ok()),
        }
    }

    /// Document with no elements; every lookup against it misses
    #[must_use]
    pub fn empty() -> Self {
        Self {
            html: Html::new_document(),
            base_url: None,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// First element matching `locator` in document order
    #[must_use]
    pub fn find_first(&self, locator: &Locator) -> Option<ElementRef<'_>> {
        let selector = Selector::parse(locator.selector()).ok()?;
        let mut candidates = self.html.select(&selector);

        match locator {
            Locator::AttributeContains {
                attr, substring, ..
            } => candidates.find(|el| {
                el.value()
                    .attr(attr)
                    .is_some_and(|value| value.contains(substring.as_str()))
            }),
            Locator::ExactText { value, ascend, .. } => candidates
                .filter(|el| normalize_space(&Self::text(*el)) == *value)
                .find_map(|el| ascend_levels(el, *ascend)),
            Locator::TextContains { substring, .. } => {
                candidates.find(|el| Self::text(*el).contains(substring.as_str()))
            }
        }
    }

    /// Attribute value of `element`, with URL attributes made absolute
    #[must_use]
    pub fn attribute(&self, element: ElementRef<'_>, name: &str) -> Option<String> {
        let raw = element.value().attr(name)?;

        if URL_ATTRIBUTES.contains(&name)
            && let Some(base) = &self.base_url
            && let Ok(resolved) = base.join(raw)
        {
            return Some(resolved.into());
        }

        Some(raw.to_string())
    }

    /// Concatenated text content of `element` and its descendants
    #[must_use]
    pub fn text(element: ElementRef<'_>) -> String {
        element.text().collect()
    }

    /// Text of `element` as a browser lays it out: a line break at every
    /// `<br>` and around block elements, inline runs joined as-is
    #[must_use]
    pub fn rendered_text(element: ElementRef<'_>) -> String {
        let mut out = String::new();
        for edge in element.traverse() {
            match edge {
                Edge::Open(node) => match node.value() {
                    Node::Text(text) => out.push_str(text),
                    Node::Element(el) if el.name() == "br" || BLOCK_ELEMENTS.contains(&el.name()) => {
                        out.push('\n');
                    }
                    _ => {}
                },
                Edge::Close(node) => {
                    if let Node::Element(el) = node.value()
                        && BLOCK_ELEMENTS.contains(&el.name())
                    {
                        out.push('\n');
                    }
                }
            }
        }
        out
    }

    /// Link target of a container: its own `href`, else the first descendant
    /// carrying one
    #[must_use]
    pub fn link_target(&self, element: ElementRef<'_>) -> Option<String> {
        if let Some(href) = self.attribute(element, "href") {
            return Some(href);
        }

        let with_href = Selector::parse("[href]").ok()?;
        let inner = element.select(&with_href).next()?;
        self.attribute(inner, "href")
    }
}

/// Walk `levels` parents up from `element`.
///
/// Fails when the walk leaves the element tree (reaches the document root).
fn ascend_levels(element: ElementRef<'_>, levels: usize) -> Option<ElementRef<'_>> {
    let mut node: NodeRef<'_, Node> = *element;
    for _ in 0..levels {
        node = node.parent()?;
    }
    ElementRef::wrap(node)
}
