//! Progress reporting for scrape runs
//!
//! The runner creates one tracker per URL and advances it twice: once when
//! the fetch starts and once when the page is finished. Sinks must accept
//! updates from several workers at the same time.

mod silent;
mod terminal;

pub use silent::SilentProgress;
pub use terminal::{ProgressLogWriter, TerminalProgress};

/// Number of steps each URL moves through (fetch started, page finished)
pub const STEPS_PER_URL: u64 = 2;

/// Creates per-URL trackers
pub trait ProgressSink: Send + Sync {
    /// Registers a new tracker for one item
    fn create_tracker(&self, label: &str, total_steps: u64) -> Box<dyn ProgressTracker>;

    /// Called once after the run completes
    fn finish(&self) {}
}

/// Progress handle for a single URL
pub trait ProgressTracker: Send {
    /// Advances the tracker by `n` steps
    fn increment(&self, n: u64);

    /// Flags the tracked item as failed
    fn mark_errored(&self);
}
