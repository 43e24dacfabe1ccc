//! The per-row scrape loop

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use super::progress::{ProgressReporter, TracingProgress};
use crate::config::ScrapeConfig;
use crate::document::Document;
use crate::error::{ScrapeError, ScrapeResult};
use crate::extractor::LinkExtractor;
use crate::fetcher::{PageFetcher, with_page_timeout};
use crate::input::{InputRow, UrlSource};
use crate::output::CsvSink;
use crate::record::Record;
use crate::utils::{
    DEFAULT_ABOUT_PATH, DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_SETTLE_DELAY_MS,
    DOCUMENT_CAPTURE_TIMEOUT_SECS,
};

/// Knobs for a batch, taken from `ScrapeConfig`
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub about_path: String,
    pub settle_delay: Duration,
    pub page_load_timeout_secs: u64,
    pub strict_input: bool,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            about_path: DEFAULT_ABOUT_PATH.to_string(),
            settle_delay: Duration::from_millis(DEFAULT_SETTLE_DELAY_MS),
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            strict_input: false,
        }
    }
}

impl From<&ScrapeConfig> for BatchSettings {
    fn from(config: &ScrapeConfig) -> Self {
        Self {
            about_path: config.about_path().to_string(),
            settle_delay: config.settle_delay(),
            page_load_timeout_secs: config.page_load_timeout_secs(),
            strict_input: config.strict_input(),
        }
    }
}

/// Counters for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Input rows consumed, malformed ones included
    pub rows_read: usize,
    /// Output rows appended
    pub rows_written: usize,
    /// Rows whose page could not be loaded or read; still written
    pub page_load_failures: usize,
    /// Rows without a URL; skipped
    pub malformed_rows: usize,
}

/// Page address for an input URL: plain concatenation, no normalization
#[must_use]
pub fn about_url(base_url: &str, about_path: &str) -> String {
    format!("{base_url}{about_path}")
}

/// Runs input rows through a `PageFetcher` and the extractor, in order
pub struct BatchDriver<P: ProgressReporter = TracingProgress> {
    settings: BatchSettings,
    extractor: LinkExtractor,
    progress: P,
}

impl BatchDriver<TracingProgress> {
    #[must_use]
    pub fn new(settings: BatchSettings) -> Self {
        Self::with_progress(settings, TracingProgress)
    }
}

impl<P: ProgressReporter> BatchDriver<P> {
    #[must_use]
    pub fn with_progress(settings: BatchSettings, progress: P) -> Self {
        Self {
            settings,
            extractor: LinkExtractor::new(),
            progress,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Create the output file, then stream the input file through the batch.
    ///
    /// The output exists with its header even when the input cannot be
    /// opened.
    pub async fn run_files<F: PageFetcher>(
        &self,
        fetcher: &mut F,
        input: &Path,
        output: &Path,
    ) -> ScrapeResult<BatchSummary> {
        let mut sink = CsvSink::<File>::create(output)?;
        let source = UrlSource::open(input)?;
        self.run(fetcher, source, &mut sink).await
    }

    /// Process every row of `source`, appending one record per well-formed
    /// row to `sink` before moving on to the next.
    ///
    /// Page failures never stop the batch; the row is written with empty
    /// fields. Output errors and read errors do.
    pub async fn run<F, R, W>(
        &self,
        fetcher: &mut F,
        source: UrlSource<R>,
        sink: &mut CsvSink<W>,
    ) -> ScrapeResult<BatchSummary>
    where
        F: PageFetcher,
        R: Read,
        W: Write,
    {
        let mut summary = BatchSummary::default();

        for row in source {
            summary.rows_read += 1;

            let row = match row {
                Ok(row) => row,
                Err(ScrapeError::MalformedRow { ordinal, line }) => {
                    summary.malformed_rows += 1;
                    self.progress.report_row_malformed(ordinal, line);
                    if self.settings.strict_input {
                        return Err(ScrapeError::MalformedRow { ordinal, line });
                    }
                    continue;
                }
                Err(e) => return Err(e),
            };

            let record = match self.scrape_row(fetcher, &row).await {
                Ok(record) => record,
                Err(e) => {
                    summary.page_load_failures += 1;
                    let target = about_url(&row.url, &self.settings.about_path);
                    self.progress
                        .report_page_failed(row.ordinal, &target, &format!("{e:#}"));
                    self.extractor.extract(&Document::empty(), &row.url)
                }
            };

            sink.append(&record)?;
            summary.rows_written += 1;
            self.progress.report_row_written(row.ordinal, &record);
        }

        self.progress.report_completed(&summary);
        Ok(summary)
    }

    async fn scrape_row<F: PageFetcher>(
        &self,
        fetcher: &mut F,
        row: &InputRow,
    ) -> anyhow::Result<Record> {
        let target = about_url(&row.url, &self.settings.about_path);
        self.progress.report_row_started(row.ordinal, &row.url);

        with_page_timeout(
            fetcher.load(&target),
            self.settings.page_load_timeout_secs,
            "Page load",
        )
        .await?;

        if !self.settings.settle_delay.is_zero() {
            debug!("Waiting {:?} for {target} to settle", self.settings.settle_delay);
            tokio::time::sleep(self.settings.settle_delay).await;
        }

        let document = with_page_timeout(
            fetcher.document(),
            DOCUMENT_CAPTURE_TIMEOUT_SECS,
            "Document capture",
        )
        .await?;

        Ok(self.extractor.extract(&document, &row.url))
    }
}
