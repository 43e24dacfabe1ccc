//! Type-safe builder for `ScrapeConfig` using the typestate pattern
//!
//! `input_file` and then `output_file` must be set before `build()` becomes
//! available. Optional settings can be applied in any state.

use std::marker::PhantomData;
use std::path::PathBuf;

use super::types::ScrapeConfig;
use crate::error::{ScrapeError, ScrapeResult};

// Type states for the builder
pub struct WithInputFile;
pub struct Complete;

pub struct ScrapeConfigBuilder<State = ()> {
    pub(crate) config: ScrapeConfig,
    pub(crate) _phantom: PhantomData<State>,
}

impl Default for ScrapeConfigBuilder<()> {
    fn default() -> Self {
        Self {
            config: ScrapeConfig::default(),
            _phantom: PhantomData,
        }
    }
}

impl ScrapeConfig {
    /// Create a builder for configuring a `ScrapeConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> ScrapeConfigBuilder<()> {
        ScrapeConfigBuilder::default()
    }
}

impl<State> ScrapeConfigBuilder<State> {
    fn transition<Next>(self) -> ScrapeConfigBuilder<Next> {
        ScrapeConfigBuilder {
            config: self.config,
            _phantom: PhantomData,
        }
    }

    /// Show the browser window instead of running headless
    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    #[must_use]
    pub fn settle_delay_ms(mut self, millis: u64) -> Self {
        self.config.settle_delay_ms = millis;
        self
    }

    #[must_use]
    pub fn page_load_timeout_secs(mut self, secs: u64) -> Self {
        self.config.page_load_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn about_path(mut self, path: impl Into<String>) -> Self {
        self.config.about_path = path.into();
        self
    }

    #[must_use]
    pub fn strict_input(mut self, strict: bool) -> Self {
        self.config.strict_input = strict;
        self
    }

    #[must_use]
    pub fn chrome_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.chrome_data_dir = Some(dir.into());
        self
    }
}

impl ScrapeConfigBuilder<()> {
    pub fn input_file(mut self, path: impl Into<PathBuf>) -> ScrapeConfigBuilder<WithInputFile> {
        self.config.input_file = path.into();
        self.transition()
    }
}

impl ScrapeConfigBuilder<WithInputFile> {
    pub fn output_file(mut self, path: impl Into<PathBuf>) -> ScrapeConfigBuilder<Complete> {
        self.config.output_file = path.into();
        self.transition()
    }
}

// Build method only available when all required fields are set
impl ScrapeConfigBuilder<Complete> {
    pub fn build(self) -> ScrapeResult<ScrapeConfig> {
        let config = self.config;

        if config.input_file.as_os_str().is_empty() {
            return Err(ScrapeError::Config("input_file is required".to_string()));
        }
        if config.output_file.as_os_str().is_empty() {
            return Err(ScrapeError::Config("output_file is required".to_string()));
        }
        if config.input_file == config.output_file {
            return Err(ScrapeError::Config(format!(
                "input and output are the same file: {}",
                config.input_file.display()
            )));
        }
        if config.about_path.is_empty() {
            return Err(ScrapeError::Config("about_path must not be empty".to_string()));
        }
        if config.page_load_timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "page_load_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_match_constants() {
        let config = ScrapeConfig::builder()
            .input_file("in.csv")
            .output_file("out.csv")
            .build()
            .unwrap();

        assert!(config.headless());
        assert_eq!(config.settle_delay(), Duration::from_secs(1));
        assert_eq!(config.page_load_timeout_secs(), 30);
        assert_eq!(config.about_path(), "/about");
        assert!(!config.strict_input());
        assert!(config.chrome_data_dir().is_none());
    }

    #[test]
    fn optional_settings_apply_in_any_state() {
        let config = ScrapeConfig::builder()
            .headless(false)
            .input_file("in.csv")
            .settle_delay_ms(0)
            .output_file("out.csv")
            .about_path("/about-us")
            .strict_input(true)
            .chrome_data_dir("/tmp/profile")
            .build()
            .unwrap();

        assert!(!config.headless());
        assert_eq!(config.settle_delay(), Duration::ZERO);
        assert_eq!(config.about_path(), "/about-us");
        assert!(config.strict_input());
        assert_eq!(
            config.chrome_data_dir(),
            Some(&PathBuf::from("/tmp/profile"))
        );
    }

    #[test]
    fn rejects_same_input_and_output() {
        let err = ScrapeConfig::builder()
            .input_file("urls.csv")
            .output_file("urls.csv")
            .build()
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn rejects_empty_paths_and_zero_timeout() {
        assert!(
            ScrapeConfig::builder()
                .input_file("")
                .output_file("out.csv")
                .build()
                .is_err()
        );
        assert!(
            ScrapeConfig::builder()
                .input_file("in.csv")
                .output_file("out.csv")
                .about_path("")
                .build()
                .is_err()
        );
        assert!(
            ScrapeConfig::builder()
                .input_file("in.csv")
                .output_file("out.csv")
                .page_load_timeout_secs(0)
                .build()
                .is_err()
        );
    }
}
