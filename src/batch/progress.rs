//! Progress reporting for batch runs
//!
//! The batch loop reports lifecycle events through `ProgressReporter`; the
//! binary logs them, tests usually discard them.

use tracing::{debug, error, info, warn};

use super::driver::BatchSummary;
use crate::record::Record;

/// Receives batch lifecycle events
///
/// Reporting is for operator visibility only; nothing here affects the
/// rows written.
pub trait ProgressReporter: Send + Sync {
    /// A row is about to be fetched
    fn report_row_started(&self, ordinal: usize, url: &str);

    /// The page for a row could not be loaded or read
    fn report_page_failed(&self, ordinal: usize, url: &str, error: &str);

    /// A row has been appended to the output
    fn report_row_written(&self, ordinal: usize, record: &Record);

    /// An input row had no URL
    fn report_row_malformed(&self, ordinal: usize, line: u64);

    /// The batch finished
    fn report_completed(&self, summary: &BatchSummary);
}

/// Logs progress through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn report_row_started(&self, ordinal: usize, url: &str) {
        info!("Sl. {ordinal}: {url}");
    }

    fn report_page_failed(&self, ordinal: usize, url: &str, error: &str) {
        warn!("Row {ordinal}: failed to load {url}: {error}");
    }

    fn report_row_written(&self, ordinal: usize, record: &Record) {
        let found = record.links().filter(|(_, link)| !link.is_empty()).count();
        debug!(
            "Row {ordinal}: {found} links, email {}",
            if record.email().is_empty() { "absent" } else { "found" }
        );
    }

    fn report_row_malformed(&self, ordinal: usize, line: u64) {
        error!("Row {ordinal} (line {line}) has no URL in its first column");
    }

    fn report_completed(&self, summary: &BatchSummary) {
        info!(
            "Batch complete: {} rows read, {} written, {} page load failures, {} malformed",
            summary.rows_read,
            summary.rows_written,
            summary.page_load_failures,
            summary.malformed_rows
        );
    }
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_row_started(&self, _ordinal: usize, _url: &str) {}

    #[inline(always)]
    fn report_page_failed(&self, _ordinal: usize, _url: &str, _error: &str) {}

    #[inline(always)]
    fn report_row_written(&self, _ordinal: usize, _record: &Record) {}

    #[inline(always)]
    fn report_row_malformed(&self, _ordinal: usize, _line: u64) {}

    #[inline(always)]
    fn report_completed(&self, _summary: &BatchSummary) {}
}
