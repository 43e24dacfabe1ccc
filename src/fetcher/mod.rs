//! Page fetching
//!
//! `PageFetcher` is the seam between the batch loop and whatever loads
//! pages. `ChromiumFetcher` drives a real browser; tests plug in fetchers
//! that serve canned markup.

pub mod chromium;
pub mod page_timeout;

pub use chromium::ChromiumFetcher;
pub use page_timeout::with_page_timeout;

use anyhow::Result;
use std::future::Future;

use crate::document::Document;

/// A long-lived page-loading session.
///
/// Calls are strictly sequential: `load` a URL, then take its `document`.
pub trait PageFetcher {
    /// Navigate to `url`, resolving once the page reports loaded
    fn load(&mut self, url: &str) -> impl Future<Output = Result<()>>;

    /// Snapshot of the page most recently loaded
    fn document(&mut self) -> impl Future<Output = Result<Document>>;

    /// Release the session; called once after the batch
    fn shutdown(self) -> impl Future<Output = Result<()>>
    where
        Self: Sized;
}
