//! Output module for URL lists, result files and run summaries
//!
//! This module handles:
//! - Loading the URL list a run works on
//! - Writing scrape results to timestamped JSON files
//! - Summarizing and printing run outcomes

mod results;
pub mod summary;
mod urls;

pub use results::{results_file_name, save_results, save_results_at};
pub use summary::{print_summary, RunSummary};
pub use urls::load_urls;
