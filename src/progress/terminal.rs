//! Terminal progress bars backed by indicatif
//!
//! Bars are drawn on stderr, which is also where logs go. Log lines must be
//! written through [`ProgressLogWriter`] so they land above the bars instead
//! of tearing them.

use super::{ProgressSink, ProgressTracker};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum label width shown next to a bar
const LABEL_WIDTH: usize = 60;

const RUNNING_TEMPLATE: &str = "{msg:60} [{bar:25.cyan/blue}] {pos}/{len}";
const FAILED_TEMPLATE: &str = "{msg:60} [{bar:25.red}] failed";
const DONE_TEMPLATE: &str = "{msg:60} [{bar:25.green}] done";

/// One progress bar per URL, stacked in the terminal
pub struct TerminalProgress {
    multi: MultiProgress,
    bars: Mutex<Vec<ProgressBar>>,
}

impl TerminalProgress {
    /// Creates a sink drawing to stderr
    pub fn new() -> Self {
        Self::with_multi(MultiProgress::new())
    }

    /// Creates a sink that tracks progress without drawing anything
    pub fn hidden() -> Self {
        Self::with_multi(MultiProgress::with_draw_target(ProgressDrawTarget::hidden()))
    }

    fn with_multi(multi: MultiProgress) -> Self {
        Self {
            multi,
            bars: Mutex::new(Vec::new()),
        }
    }

    /// Returns a log writer that pauses the bars while a line is printed
    pub fn log_writer(&self) -> ProgressLogWriter {
        ProgressLogWriter {
            multi: self.multi.clone(),
        }
    }
}

impl Default for TerminalProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressSink for TerminalProgress {
    fn create_tracker(&self, label: &str, total_steps: u64) -> Box<dyn ProgressTracker> {
        let bar = self.multi.add(ProgressBar::new(total_steps));
        bar.set_style(style(RUNNING_TEMPLATE));
        bar.set_message(truncate_label(label));

        if let Ok(mut bars) = self.bars.lock() {
            bars.push(bar.clone());
        }

        Box::new(TerminalTracker {
            bar,
            errored: AtomicBool::new(false),
        })
    }

    /// Freezes every bar in its final state; the display is left on screen
    fn finish(&self) {
        let Ok(bars) = self.bars.lock() else {
            return;
        };
        for bar in bars.iter().filter(|bar| !bar.is_finished()) {
            bar.abandon();
        }
    }
}

/// Stderr writer for the tracing subscriber that cooperates with the bars
#[derive(Clone)]
pub struct ProgressLogWriter {
    multi: MultiProgress,
}

impl Write for ProgressLogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.multi.suspend(|| io::stderr().write_all(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

impl<'a> MakeWriter<'a> for ProgressLogWriter {
    type Writer = ProgressLogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

struct TerminalTracker {
    bar: ProgressBar,
    errored: AtomicBool,
}

impl ProgressTracker for TerminalTracker {
    fn increment(&self, n: u64) {
        self.bar.inc(n);

        let done = self
            .bar
            .length()
            .is_some_and(|len| self.bar.position() >= len);
        if done {
            if self.errored.load(Ordering::SeqCst) {
                self.bar.set_style(style(FAILED_TEMPLATE));
            } else {
                self.bar.set_style(style(DONE_TEMPLATE));
            }
            self.bar.finish();
        }
    }

    fn mark_errored(&self) {
        self.errored.store(true, Ordering::SeqCst);
        self.bar.set_style(style(FAILED_TEMPLATE));
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// Shortens a label to the display width, marking the cut with an ellipsis
fn truncate_label(label: &str) -> String {
    if label.chars().count() <= LABEL_WIDTH {
        return label.to_string();
    }
    let kept: String = label.chars().take(LABEL_WIDTH - 3).collect();
    format!("{}...", kept)
}
