use super::{ProgressSink, ProgressTracker};

/// Sink that discards all progress updates
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

struct SilentTracker;

impl ProgressSink for SilentProgress {
    fn create_tracker(&self, _label: &str, _total_steps: u64) -> Box<dyn ProgressTracker> {
        Box::new(SilentTracker)
    }
}

impl ProgressTracker for SilentTracker {
    fn increment(&self, _n: u64) {}

    fn mark_errored(&self) {}
}
