//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building HTTP clients with the configured user agent and timeout
//! - GET requests returning the full response body
//! - Cancellation of in-flight requests
//! - Error classification
//!
//! An in-memory [`StaticFetcher`] serves canned responses for tests and
//! offline runs.

use crate::config::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Timeout used when none is configured
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors produced while fetching a single URL
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("creating request for {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("fetching {url}: unexpected status {status}")]
    Status { url: String, status: u16 },

    #[error("fetching {url}: request timed out")]
    Timeout { url: String },

    #[error("fetching {url}: connection failed: {message}")]
    Connect { url: String, message: String },

    #[error("fetching {url}: {message}")]
    Request { url: String, message: String },

    #[error("reading body from {url}: {message}")]
    Body { url: String, message: String },

    #[error("request cancelled")]
    Cancelled,
}

impl FetchError {
    /// Returns the HTTP status code for status errors
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Classifies a reqwest error raised while sending a request
    fn from_send(url: &str, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else if error.is_connect() {
            Self::Connect {
                url: url.to_string(),
                message: error.to_string(),
            }
        } else {
            Self::Request {
                url: url.to_string(),
                message: error.to_string(),
            }
        }
    }
}

/// Retrieves raw page content
///
/// Implementations must issue at most one request per call and stop
/// promptly once `cancel` fires.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url` and returns the full response body
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Settings for the production fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetcherConfig {
    /// Total timeout for one request, body included
    pub timeout: Duration,

    /// User-Agent header value
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetcherConfig {
    /// Returns the user agent, falling back to the default when empty
    pub fn effective_user_agent(&self) -> &str {
        if self.user_agent.trim().is_empty() {
            DEFAULT_USER_AGENT
        } else {
            &self.user_agent
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The fetcher configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use pagesweep::scrape::{build_http_client, FetcherConfig};
///
/// let client = build_http_client(&FetcherConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &FetcherConfig) -> Result<Client, reqwest::Error> {
    let timeout = if config.timeout.is_zero() {
        DEFAULT_TIMEOUT
    } else {
        config.timeout
    };

    Client::builder()
        .user_agent(config.effective_user_agent())
        .timeout(timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Production fetcher issuing real HTTP GET requests
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with its own HTTP client
    pub fn new(config: &FetcherConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn get_body(&self, target: Url, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(target)
            .send()
            .await
            .map_err(|e| FetchError::from_send(url, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Body {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;

        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Vec<u8>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }

        let target = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!("GET {}", url);

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FetchError::Cancelled),
            result = self.get_body(target, url) => result,
        }
    }
}

/// Canned response served by [`StaticFetcher`]
#[derive(Debug, Clone)]
enum StaticResponse {
    Body(Vec<u8>),
    Status(u16),
    Error(String),
}

/// In-memory fetcher returning canned responses
///
/// URLs without a registered response produce a 404 status error.
#[derive(Debug, Default)]
pub struct StaticFetcher {
    responses: HashMap<String, StaticResponse>,
    delay: Duration,
    delays: HashMap<String, Duration>,
    requests: AtomicUsize,
}

impl StaticFetcher {
    /// Creates a fetcher with no registered responses
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` with status 200 for `url`
    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.responses
            .insert(url.into(), StaticResponse::Body(body.into()));
        self
    }

    /// Answers `url` with the given HTTP status
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), StaticResponse::Status(status));
        self
    }

    /// Fails `url` with a transport error
    pub fn with_error(mut self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses
            .insert(url.into(), StaticResponse::Error(message.into()));
        self
    }

    /// Waits this long before answering each request
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Waits this long before answering `url`, overriding the shared delay
    pub fn with_delay_for(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// Number of fetch calls served so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, cancel: &CancellationToken, url: &str) -> Result<Vec<u8>, FetchError> {
        if cancel.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        self.requests.fetch_add(1, Ordering::SeqCst);

        let delay = self.delays.get(url).copied().unwrap_or(self.delay);
        if !delay.is_zero() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(FetchError::Cancelled),
                _ = tokio::time::sleep(delay) => {}
            }
        }

        match self.responses.get(url) {
            Some(StaticResponse::Body(body)) => Ok(body.clone()),
            Some(StaticResponse::Status(status)) if *status == 200 => Ok(Vec::new()),
            Some(StaticResponse::Status(status)) => Err(FetchError::Status {
                url: url.to_string(),
                status: *status,
            }),
            Some(StaticResponse::Error(message)) => Err(FetchError::Request {
                url: url.to_string(),
                message: message.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
