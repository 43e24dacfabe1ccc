pub mod batch;
pub mod browser_setup;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod input;
pub mod output;
pub mod record;
pub mod utils;

pub use batch::{
    BatchDriver, BatchSettings, BatchSummary, NoOpProgress, ProgressReporter, TracingProgress,
};
pub use browser_setup::{
    BrowserSession, download_managed_browser, find_browser_executable, launch_browser,
};
pub use config::ScrapeConfig;
pub use document::{Document, Locator};
pub use error::{ScrapeError, ScrapeResult};
pub use extractor::LinkExtractor;
pub use fetcher::{ChromiumFetcher, PageFetcher};
pub use input::{InputRow, UrlSource};
pub use output::CsvSink;
pub use record::{HEADER, Platform, Record};

use tracing::warn;

/// Scrape every URL in the configured input file into the output file.
///
/// The output file is created before the browser starts. The browser
/// session is shut down on every path out of the batch.
pub async fn scrape(config: ScrapeConfig) -> ScrapeResult<BatchSummary> {
    let mut sink = CsvSink::create(config.output_file())?;
    let source = UrlSource::open(config.input_file())?;

    let mut fetcher = ChromiumFetcher::launch(&config)
        .await
        .map_err(|e| ScrapeError::Browser(format!("{e:#}")))?;

    let driver = BatchDriver::new(BatchSettings::from(&config));
    let result = driver.run(&mut fetcher, source, &mut sink).await;

    if let Err(e) = fetcher.shutdown().await {
        warn!("Browser shutdown failed: {e:#}");
    }

    result
}
