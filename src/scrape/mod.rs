//! Scrape module for page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with timeout, user agent and cancellation
//! - HTML parsing for title, link and image extraction
//! - Single-page scraping that always yields a result record
//! - Sequential and worker-pool execution over a URL list

mod fetcher;
mod page;
mod parser;
mod runner;

pub use fetcher::{
    build_http_client, FetchError, Fetcher, FetcherConfig, HttpFetcher, StaticFetcher,
    DEFAULT_TIMEOUT,
};
pub use page::{DefaultScraper, FailedPage, PageError, PageScraper};
pub use parser::{parse_html, ParseError, ParsedPage};
pub use runner::ScrapeRunner;
