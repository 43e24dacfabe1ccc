//! Error types for scrape runs
//!
//! Field lookups never error (they degrade to empty strings), so everything
//! here is either an input problem, a sink problem, or browser plumbing.

use std::path::PathBuf;

/// Errors that can stop a scrape run
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// Invalid configuration detected while building `ScrapeConfig`
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem failure on the input or output file
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV encoding or decoding failure
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Input row without a usable URL in its first column
    #[error("Malformed input row {ordinal} (line {line}): missing URL in first column")]
    MalformedRow { ordinal: usize, line: u64 },

    /// Browser launch or session failure
    #[error("Browser error: {0}")]
    Browser(String),

    /// Other errors
    #[error("Scrape error: {0}")]
    Other(String),
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        // {:#} keeps the whole context chain
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `ScrapeError`
pub type ScrapeResult<T> = Result<T, ScrapeError>;
