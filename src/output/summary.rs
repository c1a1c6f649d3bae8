//! Run summaries
//!
//! This module condenses a finished run into success and failure counts
//! and prints them for the user.

use crate::state::Page;
use std::time::Duration;

/// Outcome counts for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of result records
    pub total: usize,

    /// Records without an error
    pub successful: usize,

    /// Failed URLs and their error messages, in result order
    pub failures: Vec<(String, String)>,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Builds a summary from the pages a run returned
    pub fn from_pages(pages: &[Page], duration: Duration) -> Self {
        let failures: Vec<(String, String)> = pages
            .iter()
            .filter(|p| p.has_error())
            .map(|p| (p.url.clone(), p.error.clone().unwrap_or_default()))
            .collect();

        Self {
            total: pages.len(),
            successful: pages.len() - failures.len(),
            failures,
            duration,
        }
    }

    /// Number of failed records
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Percentage of successful records (0 for an empty run)
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.successful as f64 / self.total as f64) * 100.0
        }
    }
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!(
        "{}/{} successful | Duration: {:.2?}",
        summary.successful, summary.total, summary.duration
    );

    if !summary.failures.is_empty() {
        println!();
        println!("Failures ({}):", summary.failed());
        for (url, error) in &summary.failures {
            println!("  - {}: {}", url, error);
        }
    }

    println!("Success Rate: {:.1}%", summary.success_rate());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let pages = vec![
            Page::success("https://a.test", "A", vec![], vec![]),
            Page::failure("https://b.test", "fetch failed: request cancelled"),
            Page::success("https://c.test", "C", vec![], vec![]),
        ];

        let summary = RunSummary::from_pages(&pages, Duration::from_secs(2));

        assert_eq!(summary.total, 3);
        assert_eq!(summary.successful, 2);
        assert_eq!(summary.failed(), 1);
        assert_eq!(
            summary.failures,
            vec![(
                "https://b.test".to_string(),
                "fetch failed: request cancelled".to_string()
            )]
        );
        assert!((summary.success_rate() - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_empty_summary() {
        let summary = RunSummary::from_pages(&[], Duration::ZERO);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.success_rate(), 0.0);
    }
}
