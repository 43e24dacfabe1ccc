//! Core configuration types for scrape runs

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::utils::{DEFAULT_ABOUT_PATH, DEFAULT_PAGE_LOAD_TIMEOUT_SECS, DEFAULT_SETTLE_DELAY_MS};

/// Main configuration struct for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// CSV file with one base URL per row
    pub(crate) input_file: PathBuf,

    /// CSV file the results are written to; recreated on every run
    pub(crate) output_file: PathBuf,

    /// Run the browser without a visible window
    pub(crate) headless: bool,

    /// Delay after a page load before the page is read
    ///
    /// Gives client-side rendering time to insert link lists.
    ///
    /// Default: 1000 ms
    pub(crate) settle_delay_ms: u64,

    /// Timeout in seconds for loading one page
    ///
    /// A load that times out is treated like a load that failed: the row
    /// is still written, with every field empty.
    ///
    /// Default: 30 seconds
    pub(crate) page_load_timeout_secs: u64,

    /// Suffix appended to each input URL, e.g. `/about`
    pub(crate) about_path: String,

    /// Abort the batch on the first malformed input row
    ///
    /// When false, the row is logged and skipped and the batch continues.
    pub(crate) strict_input: bool,

    /// Chrome user data directory; a per-process temp dir when unset
    pub(crate) chrome_data_dir: Option<PathBuf>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::new(),
            output_file: PathBuf::new(),
            headless: true,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            page_load_timeout_secs: DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
            about_path: DEFAULT_ABOUT_PATH.to_string(),
            strict_input: false,
            chrome_data_dir: None,
        }
    }
}
