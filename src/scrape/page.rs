//! Single-page scraping
//!
//! Combines a [`Fetcher`] with the HTML parser into one operation that
//! always yields a [`Page`] record, even when something goes wrong.

use crate::scrape::fetcher::{FetchError, Fetcher};
use crate::scrape::parser::{parse_html, ParseError};
use crate::state::Page;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

/// Why a page could not be scraped
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("no fetcher configured")]
    NoFetcher,

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("parse failed: {0}")]
    Parse(#[from] ParseError),
}

/// A failed scrape, still carrying its result record
///
/// The page's `error` field holds the rendered [`PageError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to scrape {}: {source}", .page.url)]
pub struct FailedPage {
    pub page: Page,
    #[source]
    pub source: PageError,
}

impl FailedPage {
    /// Builds the failure record for `url`
    pub fn new(url: &str, source: PageError) -> Self {
        Self {
            page: Page::failure(url, source.to_string()),
            source,
        }
    }

    /// Returns the result record, discarding the typed cause
    pub fn into_page(self) -> Page {
        self.page
    }
}

/// Scrapes a single URL
///
/// Implementations never lose a record: failures come back as
/// [`FailedPage`], which wraps the record alongside the cause.
#[async_trait]
pub trait PageScraper: Send + Sync {
    /// Fetches and parses `url`
    async fn scrape(&self, cancel: &CancellationToken, url: &str) -> Result<Page, FailedPage>;
}

/// Production scraper: fetch, then parse
#[derive(Clone, Default)]
pub struct DefaultScraper {
    fetcher: Option<Arc<dyn Fetcher>>,
}

impl DefaultScraper {
    /// Creates a scraper using the given fetcher
    pub fn new(fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            fetcher: Some(fetcher),
        }
    }

    /// Returns true if a fetcher is attached
    pub fn has_fetcher(&self) -> bool {
        self.fetcher.is_some()
    }
}

#[async_trait]
impl PageScraper for DefaultScraper {
    async fn scrape(&self, cancel: &CancellationToken, url: &str) -> Result<Page, FailedPage> {
        let Some(fetcher) = self.fetcher.as_ref() else {
            return Err(FailedPage::new(url, PageError::NoFetcher));
        };

        let body = fetcher
            .fetch(cancel, url)
            .await
            .map_err(|e| FailedPage::new(url, e.into()))?;

        let parsed = parse_html(&body).map_err(|e| FailedPage::new(url, e.into()))?;

        tracing::debug!(
            "Scraped {}: {} links, {} images",
            url,
            parsed.links.len(),
            parsed.images.len()
        );

        Ok(Page::success(url, parsed.title, parsed.links, parsed.images))
    }
}
