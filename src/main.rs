//! Command-line entry point.
//!
//! Reads base URLs from a CSV file, visits `<url>/about` for each in a
//! browser, and writes the social and contact links found to another CSV.
//!
//! ```bash
//! socialscrape --input input.csv --output output.csv
//! RUST_LOG=debug socialscrape --headed --settle-ms 2000
//! ```
//!
//! `CHROMIUM_PATH` overrides the browser executable.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use socialscrape::utils::{
    DEFAULT_ABOUT_PATH, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_LOAD_TIMEOUT_SECS,
    DEFAULT_SETTLE_DELAY_MS,
};
use socialscrape::{ScrapeConfig, scrape};

/// Collect social-media and contact links from websites' About pages.
#[derive(Parser, Debug)]
#[command(name = "socialscrape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with one base URL per row in the first column
    #[arg(short, long, default_value = DEFAULT_INPUT_FILE)]
    input: PathBuf,

    /// CSV file to write; replaced if it exists
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Milliseconds to wait after each page load
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY_MS)]
    settle_ms: u64,

    /// Seconds before a page load is abandoned
    #[arg(long, default_value_t = DEFAULT_PAGE_LOAD_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Path appended to every base URL
    #[arg(long, default_value = DEFAULT_ABOUT_PATH)]
    about_path: String,

    /// Stop at the first input row without a URL
    #[arg(long)]
    strict: bool,

    /// Browser profile directory (a temporary one by default)
    #[arg(long)]
    chrome_data_dir: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> Result<ScrapeConfig> {
        let mut builder = ScrapeConfig::builder()
            .input_file(self.input)
            .output_file(self.output)
            .headless(!self.headed)
            .settle_delay_ms(self.settle_ms)
            .page_load_timeout_secs(self.timeout_secs)
            .about_path(self.about_path)
            .strict_input(self.strict);

        if let Some(dir) = self.chrome_data_dir {
            builder = builder.chrome_data_dir(dir);
        }

        builder.build().context("Invalid configuration")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_config()?;
    info!(
        "Scraping {} -> {}",
        config.input_file().display(),
        config.output_file().display()
    );

    let summary = scrape(config).await?;
    info!(
        "Wrote {} rows ({} page load failures, {} malformed input rows skipped)",
        summary.rows_written, summary.page_load_failures, summary.malformed_rows
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_onto_config() {
        let config = Cli::parse_from(["socialscrape"]).into_config().unwrap();
        assert_eq!(config.input_file(), PathBuf::from("input.csv"));
        assert_eq!(config.output_file(), PathBuf::from("output.csv"));
        assert!(config.headless());
        assert_eq!(config.about_path(), "/about");
        assert!(!config.strict_input());
    }

    #[test]
    fn flags_map_onto_config() {
        let config = Cli::parse_from([
            "socialscrape",
            "--input",
            "bands.csv",
            "--output",
            "links.csv",
            "--headed",
            "--settle-ms",
            "0",
            "--strict",
            "--chrome-data-dir",
            "/tmp/profile",
        ])
        .into_config()
        .unwrap();

        assert!(!config.headless());
        assert!(config.settle_delay().is_zero());
        assert!(config.strict_input());
        assert_eq!(config.chrome_data_dir(), Some(&PathBuf::from("/tmp/profile")));
    }

    #[test]
    fn same_input_and_output_is_rejected() {
        let result = Cli::parse_from(["socialscrape", "-i", "a.csv", "-o", "a.csv"]).into_config();
        assert!(result.is_err());
    }
}
