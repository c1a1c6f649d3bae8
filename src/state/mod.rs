//! State module for scrape results and run modes
//!
//! # Components
//!
//! - `Page`: The result record produced for every scraped URL
//! - `ScrapeMode`: Whether a run processes URLs sequentially or in parallel

mod page;
mod scrape_mode;

// Re-export main types
pub use page::Page;
pub use scrape_mode::ScrapeMode;
