//! Execution engine - runs the page scraper over a URL list
//!
//! Two strategies share the same per-URL steps:
//! - Sequential: one URL at a time, results in input order
//! - Parallel: a fixed pool of workers pulling indices from one shared
//!   queue, results in completion order
//!
//! Every submitted URL yields exactly one [`Page`], including URLs skipped
//! because the run was cancelled.

use crate::progress::{ProgressSink, SilentProgress, STEPS_PER_URL};
use crate::scrape::fetcher::FetchError;
use crate::scrape::page::{PageError, PageScraper};
use crate::state::{Page, ScrapeMode};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

/// Drives a [`PageScraper`] over a list of URLs
#[derive(Clone)]
pub struct ScrapeRunner {
    scraper: Arc<dyn PageScraper>,
    progress: Arc<dyn ProgressSink>,
}

impl ScrapeRunner {
    /// Creates a runner that reports no progress
    pub fn new(scraper: Arc<dyn PageScraper>) -> Self {
        Self {
            scraper,
            progress: Arc::new(SilentProgress),
        }
    }

    /// Replaces the progress sink
    pub fn with_progress(mut self, progress: Arc<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Runs the given strategy
    ///
    /// `concurrency` only applies to [`ScrapeMode::Parallel`].
    pub async fn run(
        &self,
        mode: ScrapeMode,
        cancel: &CancellationToken,
        urls: &[String],
        concurrency: usize,
    ) -> Vec<Page> {
        let start_time = Instant::now();
        tracing::info!("Starting {} scrape of {} URLs", mode, urls.len());

        let pages = match mode {
            ScrapeMode::Sequential => self.run_sequential(cancel, urls).await,
            ScrapeMode::Parallel => self.run_parallel(cancel, urls, concurrency).await,
        };

        let successful = pages.iter().filter(|p| p.is_success()).count();
        tracing::info!(
            "Scrape finished: {}/{} successful in {:?}",
            successful,
            pages.len(),
            start_time.elapsed()
        );

        pages
    }

    /// Scrapes URLs one at a time, in input order
    ///
    /// Once `cancel` fires, the remaining URLs are not fetched; each gets a
    /// cancelled record instead.
    pub async fn run_sequential(&self, cancel: &CancellationToken, urls: &[String]) -> Vec<Page> {
        let mut pages = Vec::with_capacity(urls.len());

        for url in urls {
            let page = if cancel.is_cancelled() {
                skip_with_tracking(self.progress.as_ref(), url)
            } else {
                scrape_with_tracking(self.scraper.as_ref(), self.progress.as_ref(), cancel, url)
                    .await
            };
            pages.push(page);
        }

        self.progress.finish();
        pages
    }

    /// Scrapes URLs with a pool of `concurrency` workers
    ///
    /// A concurrency of zero is treated as one. Workers claim indices from a
    /// shared queue, so a slow page never holds up the rest of a partition.
    /// Results come back in completion order.
    pub async fn run_parallel(
        &self,
        cancel: &CancellationToken,
        urls: &[String],
        concurrency: usize,
    ) -> Vec<Page> {
        if urls.is_empty() {
            self.progress.finish();
            return Vec::new();
        }

        let workers = concurrency.max(1);
        let urls: Arc<Vec<String>> = Arc::new(urls.to_vec());

        let (jobs_tx, jobs_rx) = mpsc::channel::<usize>(urls.len());
        let (results_tx, mut results_rx) = mpsc::channel::<(usize, Page)>(urls.len());

        for index in 0..urls.len() {
            if jobs_tx.send(index).await.is_err() {
                break;
            }
        }
        drop(jobs_tx);

        let jobs_rx = Arc::new(Mutex::new(jobs_rx));
        let mut tasks = JoinSet::new();

        for worker_id in 0..workers {
            let jobs_rx = Arc::clone(&jobs_rx);
            let results_tx = results_tx.clone();
            let urls = Arc::clone(&urls);
            let scraper = Arc::clone(&self.scraper);
            let progress = Arc::clone(&self.progress);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                loop {
                    let next = jobs_rx.lock().await.recv().await;
                    let Some(index) = next else {
                        break;
                    };

                    let url = &urls[index];
                    let page = if cancel.is_cancelled() {
                        skip_with_tracking(progress.as_ref(), url)
                    } else {
                        tracing::debug!("Worker {} claimed {}", worker_id, url);
                        scrape_with_tracking(scraper.as_ref(), progress.as_ref(), &cancel, url)
                            .await
                    };

                    if results_tx.send((index, page)).await.is_err() {
                        tracing::error!("Result channel closed before {} was recorded", url);
                        break;
                    }
                }
            });
        }
        drop(results_tx);

        // Wait for every worker before draining
        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                tracing::error!("Scrape worker failed: {}", e);
            }
        }

        let mut seen = vec![false; urls.len()];
        let mut pages = Vec::with_capacity(urls.len());
        while let Some((index, page)) = results_rx.recv().await {
            seen[index] = true;
            pages.push(page);
        }

        // A worker that died mid-item must not cost us its record
        for (index, _) in seen.iter().enumerate().filter(|(_, done)| !**done) {
            pages.push(Page::failure(&urls[index], "scrape task aborted"));
        }

        self.progress.finish();
        pages
    }
}

/// Scrapes one URL, advancing its tracker before and after
async fn scrape_with_tracking(
    scraper: &dyn PageScraper,
    progress: &dyn ProgressSink,
    cancel: &CancellationToken,
    url: &str,
) -> Page {
    let tracker = progress.create_tracker(url, STEPS_PER_URL);
    tracker.increment(1);

    let page = match scraper.scrape(cancel, url).await {
        Ok(page) => page,
        Err(failed) => {
            tracing::warn!("{}", failed);
            tracker.mark_errored();
            failed.into_page()
        }
    };

    tracker.increment(1);
    page
}

/// Records a URL that was never started because the run was cancelled
fn skip_with_tracking(progress: &dyn ProgressSink, url: &str) -> Page {
    let tracker = progress.create_tracker(url, STEPS_PER_URL);
    tracker.increment(1);
    tracker.mark_errored();
    tracker.increment(1);

    tracing::debug!("Skipping {}: run cancelled", url);
    Page::failure(url, PageError::Fetch(FetchError::Cancelled).to_string())
}
