//! Configuration module for scrape runs
//!
//! This module provides the `ScrapeConfig` struct and its type-safe builder
//! for configuring a batch run with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod types;

// Re-exports for public API
pub use builder::{Complete, ScrapeConfigBuilder, WithInputFile};
pub use types::ScrapeConfig;
