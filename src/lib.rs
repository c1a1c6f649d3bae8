//! Pagesweep: a batch page scraper
//!
//! This crate fetches a list of URLs, extracts each page's title, links and
//! images, and collects one result record per URL. Pages can be processed
//! one at a time or through a bounded worker pool with live progress.

pub mod config;
pub mod output;
pub mod progress;
pub mod scrape;
pub mod state;

use thiserror::Error;

/// Main error type for run-level Pagesweep operations
///
/// Per-URL failures never surface here; they are recorded on the page itself.
#[derive(Debug, Error)]
pub enum PagesweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load URLs from {path}: {message}")]
    UrlSource { path: String, message: String },

    #[error("Failed to save results: {0}")]
    Output(String),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Pagesweep operations
pub type Result<T> = std::result::Result<T, PagesweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use scrape::{DefaultScraper, Fetcher, HttpFetcher, PageScraper, ScrapeRunner};
pub use state::{Page, ScrapeMode};
