use crate::config::validation::validate;
use crate::scrape::FetcherConfig;
use crate::ConfigResult;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// User agent sent when none is configured
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 18_7 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/26.0 Mobile/15E148 Safari/604.1";

/// Main configuration structure for Pagesweep
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scraper: ScraperConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// JSON file holding the array of URLs to scrape
    #[serde(rename = "urls-file")]
    pub urls_file: String,

    /// Directory that receives saved result files
    #[serde(rename = "results-directory")]
    pub results_directory: String,

    /// Number of workers used in parallel mode
    pub concurrency: u32,

    /// Total timeout applied to every request (seconds)
    #[serde(rename = "http-timeout-seconds")]
    pub http_timeout_seconds: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Config {
    /// Applies a command-line worker count and re-validates the result
    pub fn with_concurrency(mut self, concurrency: Option<u32>) -> ConfigResult<Self> {
        if let Some(concurrency) = concurrency {
            self.scraper.concurrency = concurrency;
            validate(&self)?;
        }
        Ok(self)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            urls_file: "urls.json".to_string(),
            results_directory: "output".to_string(),
            concurrency: 5,
            http_timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ScraperConfig {
    /// Returns the request timeout as a `Duration`
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }

    /// Builds the fetcher settings from this configuration
    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            timeout: self.http_timeout(),
            user_agent: self.user_agent.clone(),
        }
    }
}
