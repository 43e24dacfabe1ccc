//! Shared configuration constants for socialscrape
//!
//! Default values used by the config builder and the browser launcher.

/// Path appended to every input URL before fetching
///
/// Plain string concatenation: `https://a.com` becomes `https://a.com/about`
/// and `https://a.com/` becomes `https://a.com//about`.
pub const DEFAULT_ABOUT_PATH: &str = "/about";

/// Post-load settling delay: 1 second
///
/// About pages built with client-side frameworks often render their link
/// lists after the load event fires.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1_000;

/// Upper bound on a single page load: 30 seconds
///
/// A load that exceeds it is handled exactly like a failed load.
pub const DEFAULT_PAGE_LOAD_TIMEOUT_SECS: u64 = 30;

/// Upper bound on capturing the rendered HTML of a loaded page
pub const DOCUMENT_CAPTURE_TIMEOUT_SECS: u64 = 10;

/// Default input file when none is given on the command line
pub const DEFAULT_INPUT_FILE: &str = "input.csv";

/// Default output file when none is given on the command line
pub const DEFAULT_OUTPUT_FILE: &str = "output.csv";

/// Chrome user agent string sent by the managed browser
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
