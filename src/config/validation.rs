use crate::config::types::{Config, ScraperConfig};
use crate::ConfigError;

/// Upper bound on worker count
const MAX_CONCURRENCY: u32 = 100;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.urls_file.trim().is_empty() {
        return Err(ConfigError::Validation(
            "urls-file cannot be empty".to_string(),
        ));
    }

    if config.results_directory.trim().is_empty() {
        return Err(ConfigError::Validation(
            "results-directory cannot be empty".to_string(),
        ));
    }

    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    if config.http_timeout_seconds < 1 {
        return Err(ConfigError::Validation(format!(
            "http-timeout-seconds must be >= 1, got {}",
            config.http_timeout_seconds
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}
