//! Test utilities shared by the socialscrape integration tests

use anyhow::{Context, Result};
use socialscrape::batch::ProgressReporter;
use socialscrape::{BatchSummary, Document, PageFetcher, Record};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Header line exactly as written to disk, BOM included
#[allow(dead_code)]
pub const HEADER_LINE: &str = "\u{feff}url,instagram,twitter,youtube,facebook,discord,reddit,tiktok,vk,spotify,linktr,website,email";

/// Wraps a body fragment in a minimal HTML page
#[allow(dead_code)]
pub fn create_test_html(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>About</title>
</head>
<body>
    {body}
</body>
</html>"#
    )
}

/// In-memory `PageFetcher`: serves canned markup by URL and fails every
/// URL it does not know, like a DNS failure would.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    current: Option<String>,
    /// Every URL passed to `load`, in call order
    pub visited: Vec<String>,
}

#[allow(dead_code)]
impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), create_test_html(body));
        self
    }
}

impl PageFetcher for FakeFetcher {
    async fn load(&mut self, url: &str) -> Result<()> {
        self.visited.push(url.to_string());
        if self.pages.contains_key(url) {
            self.current = Some(url.to_string());
            Ok(())
        } else {
            self.current = None;
            Err(anyhow::anyhow!("net::ERR_NAME_NOT_RESOLVED loading {url}"))
        }
    }

    async fn document(&mut self) -> Result<Document> {
        let url = self.current.as_deref().context("No page loaded")?;
        let markup = self.pages.get(url).context("Page vanished")?;
        Ok(Document::parse(markup, Some(url)))
    }

    async fn shutdown(self) -> Result<()> {
        Ok(())
    }
}

/// Fetcher whose loads never complete
#[allow(dead_code)]
pub struct HangingFetcher;

impl PageFetcher for HangingFetcher {
    async fn load(&mut self, _url: &str) -> Result<()> {
        std::future::pending::<()>().await;
        Ok(())
    }

    async fn document(&mut self) -> Result<Document> {
        Ok(Document::empty())
    }

    async fn shutdown(self) -> Result<()> {
        Ok(())
    }
}

/// Progress reporter that keeps a log of every event
#[derive(Clone, Default)]
pub struct RecordingProgress {
    pub events: Arc<Mutex<Vec<String>>>,
}

#[allow(dead_code)]
impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for RecordingProgress {
    fn report_row_started(&self, ordinal: usize, url: &str) {
        self.push(format!("started {ordinal} {url}"));
    }

    fn report_page_failed(&self, ordinal: usize, url: &str, _error: &str) {
        self.push(format!("failed {ordinal} {url}"));
    }

    fn report_row_written(&self, ordinal: usize, record: &Record) {
        self.push(format!("written {ordinal} {}", record.source_url()));
    }

    fn report_row_malformed(&self, ordinal: usize, line: u64) {
        self.push(format!("malformed {ordinal} line {line}"));
    }

    fn report_completed(&self, summary: &BatchSummary) {
        self.push(format!("completed {}", summary.rows_written));
    }
}

/// Split written output into lines, dropping the trailing empty one
#[allow(dead_code)]
pub fn output_lines(bytes: Vec<u8>) -> Vec<String> {
    let text = String::from_utf8(bytes).unwrap();
    let mut lines: Vec<String> = text.split("\r\n").map(str::to_string).collect();
    assert_eq!(lines.pop().as_deref(), Some(""), "output must end with CRLF");
    lines
}
