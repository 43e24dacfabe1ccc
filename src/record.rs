//! Scraped record and the fixed output column layout.

use serde::Serialize;
use std::fmt;

/// Platforms probed on every page, in probe and column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Twitter,
    Youtube,
    Facebook,
    Discord,
    Reddit,
    Tiktok,
    Vk,
    Spotify,
    Linktr,
    Website,
}

impl Platform {
    pub const COUNT: usize = 11;

    /// Every platform in fixed order
    pub const ALL: [Platform; Self::COUNT] = [
        Self::Instagram,
        Self::Twitter,
        Self::Youtube,
        Self::Facebook,
        Self::Discord,
        Self::Reddit,
        Self::Tiktok,
        Self::Vk,
        Self::Spotify,
        Self::Linktr,
        Self::Website,
    ];

    /// Column name used in the output header
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Twitter => "twitter",
            Self::Youtube => "youtube",
            Self::Facebook => "facebook",
            Self::Discord => "discord",
            Self::Reddit => "reddit",
            Self::Tiktok => "tiktok",
            Self::Vk => "vk",
            Self::Spotify => "spotify",
            Self::Linktr => "linktr",
            Self::Website => "website",
        }
    }

    /// How this platform's link is recognised on a page
    #[must_use]
    pub const fn anchor(self) -> PlatformAnchor {
        match self {
            Self::Instagram => PlatformAnchor::Domain("instagram.com"),
            Self::Twitter => PlatformAnchor::Domain("twitter.com"),
            Self::Youtube => PlatformAnchor::Domain("youtube.com"),
            Self::Facebook => PlatformAnchor::Domain("facebook.com"),
            Self::Discord => PlatformAnchor::Label("Discord"),
            Self::Reddit => PlatformAnchor::Domain("reddit.com"),
            Self::Tiktok => PlatformAnchor::Domain("tiktok.com"),
            Self::Vk => PlatformAnchor::Domain("vk.com"),
            Self::Spotify => PlatformAnchor::Domain("spotify.com"),
            Self::Linktr => PlatformAnchor::Domain("linktr.ee"),
            Self::Website => PlatformAnchor::Label("Website"),
        }
    }

    /// Domain substring, for platforms recognised by link target
    #[must_use]
    pub const fn domain(self) -> Option<&'static str> {
        match self.anchor() {
            PlatformAnchor::Domain(domain) => Some(domain),
            PlatformAnchor::Label(_) => None,
        }
    }

    /// Visible label text, for platforms recognised by a text label
    #[must_use]
    pub const fn label(self) -> Option<&'static str> {
        match self.anchor() {
            PlatformAnchor::Label(label) => Some(label),
            PlatformAnchor::Domain(_) => None,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// What identifies a platform's link on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformAnchor {
    /// Hyperlink whose target contains this substring
    Domain(&'static str),
    /// Paragraph whose normalized text is exactly this label
    Label(&'static str),
}

/// Number of columns in every output row
pub const COLUMN_COUNT: usize = Platform::COUNT + 2;

/// Output header: source URL, one column per platform, then email
pub const HEADER: [&str; COLUMN_COUNT] = [
    "url",
    "instagram",
    "twitter",
    "youtube",
    "facebook",
    "discord",
    "reddit",
    "tiktok",
    "vk",
    "spotify",
    "linktr",
    "website",
    "email",
];

/// One scraped result.
///
/// Every platform slot is always present; an empty string means "not found".
/// Fields are private so a record cannot change after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    source_url: String,
    links: [String; Platform::COUNT],
    email: String,
}

impl Record {
    pub(crate) fn new(
        source_url: impl Into<String>,
        links: [String; Platform::COUNT],
        email: String,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            links,
            email,
        }
    }

    /// Record with every field set to the empty sentinel
    #[must_use]
    pub fn empty(source_url: impl Into<String>) -> Self {
        Self::new(source_url, Default::default(), String::new())
    }

    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    #[must_use]
    pub fn link(&self, platform: Platform) -> &str {
        &self.links[platform.index()]
    }

    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Platform/link pairs in column order, sentinels included
    pub fn links(&self) -> impl Iterator<Item = (Platform, &str)> {
        Platform::ALL
            .iter()
            .map(move |&platform| (platform, self.link(platform)))
    }

    /// Field values in `HEADER` order
    #[must_use]
    pub fn csv_fields(&self) -> [&str; COLUMN_COUNT] {
        let mut fields = [""; COLUMN_COUNT];
        fields[0] = &self.source_url;
        for (slot, link) in fields[1..=Platform::COUNT].iter_mut().zip(&self.links) {
            *slot = link;
        }
        fields[COLUMN_COUNT - 1] = &self.email;
        fields
    }
}
