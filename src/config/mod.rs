//! Configuration module for Pagesweep
//!
//! This module handles loading, parsing, validating and writing TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use pagesweep::config::load_or_create_config;
//! use std::path::Path;
//!
//! let config = load_or_create_config(Path::new("config.toml"));
//! println!("Scraper will use concurrency: {}", config.scraper.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ScraperConfig, DEFAULT_USER_AGENT};

// Re-export parser functions
pub use parser::{load_config, load_or_create_config, save_config};
pub use validation::validate;
