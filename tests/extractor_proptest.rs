//! Property tests for the domain probes

use proptest::prelude::*;
use socialscrape::{Document, LinkExtractor, Platform};

fn page_with_link(href: &str) -> Document {
    Document::parse(
        &format!(r#"<html><body><a href="{href}">link</a></body></html>"#),
        Some("https://site.example/about"),
    )
}

fn domain_platforms() -> impl Iterator<Item = (Platform, &'static str)> {
    Platform::ALL
        .into_iter()
        .filter_map(|p| p.domain().map(|d| (p, d)))
}

proptest! {
    #[test]
    fn domain_probes_ignore_links_without_the_domain(href in "[a-z0-9:/._?=-]{0,40}") {
        prop_assume!(domain_platforms().all(|(_, domain)| !href.contains(domain)));

        let record = LinkExtractor::new().extract(&page_with_link(&href), "https://site.example");
        for (platform, _) in domain_platforms() {
            prop_assert_eq!(record.link(platform), "");
        }
    }

    #[test]
    fn domain_probes_find_links_containing_the_domain(
        index in 0usize..Platform::COUNT,
        prefix in "[a-z]{0,8}",
        path in "[a-z0-9]{0,12}",
    ) {
        let platform = Platform::ALL[index];
        let Some(domain) = platform.domain() else {
            return Ok(());
        };

        let href = format!("https://{prefix}{domain}/{path}");
        let record = LinkExtractor::new().extract(&page_with_link(&href), "https://site.example");
        prop_assert!(record.link(platform).contains(domain));
    }
}
