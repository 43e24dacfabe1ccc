//! Batch driver
//!
//! Reads input rows in order, fetches `<url>/about` for each, extracts a
//! record and appends it to the output immediately.

pub mod driver;
pub mod progress;

pub use driver::{BatchDriver, BatchSettings, BatchSummary, about_url};
pub use progress::{NoOpProgress, ProgressReporter, TracingProgress};
