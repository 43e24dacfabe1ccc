//! `PageFetcher` backed by a chromiumoxide browser
//!
//! One browser and one tab are reused for the whole batch, like a single
//! long-lived WebDriver session.

use anyhow::{Context, Result};
use chromiumoxide::page::Page;
use tracing::{debug, trace};

use super::PageFetcher;
use crate::browser_setup::{BrowserSession, launch_browser};
use crate::config::ScrapeConfig;
use crate::document::Document;

pub struct ChromiumFetcher {
    session: BrowserSession,
    page: Page,
}

impl ChromiumFetcher {
    /// Launch a browser in the mode `config` asks for and open a tab
    pub async fn launch(config: &ScrapeConfig) -> Result<Self> {
        let session = launch_browser(config.headless(), config.chrome_data_dir().cloned()).await?;
        let page = session
            .browser()
            .new_page("about:blank")
            .await
            .context("Failed to create page")?;

        Ok(Self { session, page })
    }
}

impl PageFetcher for ChromiumFetcher {
    async fn load(&mut self, url: &str) -> Result<()> {
        debug!("Navigating to {url}");
        self.page
            .goto(url)
            .await
            .with_context(|| format!("Failed to navigate to {url}"))?;
        self.page
            .wait_for_navigation()
            .await
            .context("Failed to wait for page load")?;
        Ok(())
    }

    async fn document(&mut self) -> Result<Document> {
        let html = self
            .page
            .content()
            .await
            .context("Failed to read page content")?;

        // Final URL after redirects; relative links resolve against it
        let base_url = match self.page.url().await {
            Ok(url) => url,
            Err(e) => {
                trace!("Failed to get page URL: {}", e);
                None
            }
        };

        Ok(Document::parse(&html, base_url.as_deref()))
    }

    async fn shutdown(self) -> Result<()> {
        let Self { session, page } = self;
        if let Err(e) = page.close().await {
            debug!("Failed to close page: {}", e);
        }
        session.shutdown().await
    }
}
