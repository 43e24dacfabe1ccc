//! Getter methods for `ScrapeConfig`

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::types::ScrapeConfig;

impl ScrapeConfig {
    #[must_use]
    pub fn input_file(&self) -> &Path {
        &self.input_file
    }

    #[must_use]
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn page_load_timeout_secs(&self) -> u64 {
        self.page_load_timeout_secs
    }

    #[must_use]
    pub fn about_path(&self) -> &str {
        &self.about_path
    }

    #[must_use]
    pub fn strict_input(&self) -> bool {
        self.strict_input
    }

    #[must_use]
    pub fn chrome_data_dir(&self) -> Option<&PathBuf> {
        self.chrome_data_dir.as_ref()
    }
}
