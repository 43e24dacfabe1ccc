//! Social and contact link extraction
//!
//! `LinkExtractor` runs one probe per platform against a `Document`, in the
//! fixed `Platform::ALL` order, plus one email probe. Probes are independent:
//! each yields an `Option<String>` and a miss only empties its own column.

pub mod email;

pub use email::find_email;

use tracing::{debug, trace};

use crate::document::{Document, Locator};
use crate::record::{Platform, PlatformAnchor, Record};

/// Label probes climb this many levels from the label to its link container
const LABEL_ASCEND_LEVELS: usize = 2;

/// One locator per platform plus the email paragraph locator
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    probes: [(Platform, Locator); Platform::COUNT],
    email_locator: Locator,
}

impl Default for LinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            probes: Platform::ALL.map(|platform| (platform, locator_for(platform))),
            email_locator: Locator::paragraph_containing("@"),
        }
    }

    /// Probes in the order they run
    pub fn probes(&self) -> impl Iterator<Item = &(Platform, Locator)> {
        self.probes.iter()
    }

    /// Build a fully populated `Record` for `source_url` from `document`
    #[must_use]
    pub fn extract(&self, document: &Document, source_url: &str) -> Record {
        let links = self.probes.each_ref().map(|(platform, locator)| {
            match find_link(document, locator) {
                Some(link) => {
                    debug!("{source_url}: {platform} -> {link}");
                    link
                }
                None => {
                    trace!("{source_url}: no {platform} link");
                    String::new()
                }
            }
        });

        let email = self.extract_email(document).unwrap_or_default();

        Record::new(source_url, links, email)
    }

    /// First email address in the first paragraph that mentions `@`.
    ///
    /// The paragraph is read with line breaks where a browser would show
    /// them, so `Contact<br>info@band.com` does not glue the label onto the
    /// address.
    #[must_use]
    pub fn extract_email(&self, document: &Document) -> Option<String> {
        let paragraph = document.find_first(&self.email_locator)?;
        let text = Document::rendered_text(paragraph);
        find_email(&text).map(str::to_string)
    }
}

/// Locator used for `platform`
#[must_use]
pub fn locator_for(platform: Platform) -> Locator {
    match platform.anchor() {
        PlatformAnchor::Domain(domain) => Locator::href_contains(domain),
        PlatformAnchor::Label(label) => Locator::label(label, LABEL_ASCEND_LEVELS),
    }
}

fn find_link(document: &Document, locator: &Locator) -> Option<String> {
    let element = document.find_first(locator)?;
    match locator {
        Locator::ExactText { .. } => document.link_target(element),
        _ => document.attribute(element, "href"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(body: &str) -> Document {
        Document::parse(
            &format!("<html><body>{body}</body></html>"),
            Some("https://band.example/about"),
        )
    }

    #[test]
    fn probes_run_in_platform_order() {
        let extractor = LinkExtractor::new();
        let order: Vec<Platform> = extractor.probes().map(|(p, _)| *p).collect();
        assert_eq!(order, Platform::ALL.to_vec());
    }

    #[test]
    fn label_platforms_use_text_locators() {
        assert_eq!(
            locator_for(Platform::Discord),
            Locator::label("Discord", 2)
        );
        assert_eq!(
            locator_for(Platform::Spotify),
            Locator::href_contains("spotify.com")
        );
    }

    #[test]
    fn extracts_every_kind_of_probe() {
        let doc = page(r#"
            <a href="https://instagram.com/band">ig</a>
            <a href="https://open.spotify.com/artist/1">sp</a>
            <a href="https://discord.gg/band"><div><p>Discord</p></div></a>
            <p>Booking: booking@band.example</p>
        "#);
        let record = LinkExtractor::new().extract(&doc, "https://band.example");

        assert_eq!(record.source_url(), "https://band.example");
        assert_eq!(record.link(Platform::Instagram), "https://instagram.com/band");
        assert_eq!(record.link(Platform::Spotify), "https://open.spotify.com/artist/1");
        assert_eq!(record.link(Platform::Discord), "https://discord.gg/band");
        assert_eq!(record.link(Platform::Twitter), "");
        assert_eq!(record.link(Platform::Website), "");
        assert_eq!(record.email(), "booking@band.example");
    }

    #[test]
    fn one_miss_does_not_affect_siblings() {
        // Website label with nothing to link to; twitter still found
        let doc = page(r#"
            <div><div><p>Website</p></div></div>
            <a href="https://twitter.com/band">tw</a>
        "#);
        let record = LinkExtractor::new().extract(&doc, "https://band.example");
        assert_eq!(record.link(Platform::Website), "");
        assert_eq!(record.link(Platform::Twitter), "https://twitter.com/band");
    }

    #[test]
    fn email_paragraph_without_address_is_empty() {
        let doc = page("<p>@bandname on most socials</p><p>hi@band.example</p>");
        // Only the first paragraph with an @ is considered
        assert_eq!(LinkExtractor::new().extract_email(&doc), None);
    }

    #[test]
    fn email_after_line_break_is_not_glued_to_label() {
        let doc = page("<p>Contact<br>info@band.com</p>");
        assert_eq!(
            LinkExtractor::new().extract_email(&doc).as_deref(),
            Some("info@band.com")
        );

        let doc = page("<p>Email us<br/>hello@band.com</p>");
        assert_eq!(
            LinkExtractor::new().extract_email(&doc).as_deref(),
            Some("hello@band.com")
        );
    }

    #[test]
    fn email_split_across_inline_children() {
        let doc = page("<p>Write to <span>booking</span><span>@band.com</span> anytime</p>");
        assert_eq!(
            LinkExtractor::new().extract_email(&doc).as_deref(),
            Some("booking@band.com")
        );
    }

    #[test]
    fn email_inside_paragraph_link_is_found() {
        // The @ only appears inside a child element of the paragraph
        let doc = page(r#"<p>Bookings: <a href="mailto:b@band.com">b@band.com</a></p>"#);
        assert_eq!(
            LinkExtractor::new().extract_email(&doc).as_deref(),
            Some("b@band.com")
        );
    }

    #[test]
    fn empty_document_yields_sentinels() {
        let record = LinkExtractor::new().extract(&Document::empty(), "https://a.com");
        assert_eq!(record, Record::empty("https://a.com"));
    }

    #[test]
    fn extraction_is_repeatable() {
        let doc = page(r#"<a href="https://youtube.com/@band">yt</a><p>a@b.co</p>"#);
        let extractor = LinkExtractor::new();
        assert_eq!(
            extractor.extract(&doc, "https://band.example"),
            extractor.extract(&doc, "https://band.example")
        );
    }
}
