//! Integration tests for the scraper
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! fetch, parse and collect cycle end-to-end.

use pagesweep::config::{Config, ScraperConfig};
use pagesweep::output::{load_urls, save_results_at, RunSummary};
use pagesweep::progress::{ProgressSink, ProgressTracker};
use pagesweep::scrape::{FetcherConfig, HttpFetcher};
use pagesweep::{DefaultScraper, Page, ScrapeMode, ScrapeRunner};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Counts progress calls across all trackers
#[derive(Default)]
struct CountingProgress {
    trackers: AtomicU64,
    increments: Arc<AtomicU64>,
    errored: Arc<AtomicU64>,
}

struct CountingTracker {
    increments: Arc<AtomicU64>,
    errored: Arc<AtomicU64>,
}

impl ProgressSink for CountingProgress {
    fn create_tracker(&self, _label: &str, _total_steps: u64) -> Box<dyn ProgressTracker> {
        self.trackers.fetch_add(1, Ordering::SeqCst);
        Box::new(CountingTracker {
            increments: Arc::clone(&self.increments),
            errored: Arc::clone(&self.errored),
        })
    }
}

impl ProgressTracker for CountingTracker {
    fn increment(&self, n: u64) {
        self.increments.fetch_add(n, Ordering::SeqCst);
    }

    fn mark_errored(&self) {
        self.errored.fetch_add(1, Ordering::SeqCst);
    }
}

/// Creates a test configuration with a short timeout
fn create_test_config() -> Config {
    Config {
        scraper: ScraperConfig {
            concurrency: 3,
            http_timeout_seconds: 2,
            user_agent: "TestBot/1.0".to_string(),
            ..ScraperConfig::default()
        },
    }
}

fn create_runner(config: &Config) -> ScrapeRunner {
    let fetcher = HttpFetcher::new(&config.scraper.fetcher_config()).expect("client");
    ScrapeRunner::new(Arc::new(DefaultScraper::new(Arc::new(fetcher))))
}

async fn mount_page(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a small site: two good pages, one forbidden, one server error
async fn start_site() -> (MockServer, Vec<String>) {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(
        &server,
        "/",
        r#"<html><head><title> Home </title></head><body>
            <a href="/page1">Page 1</a>
            <a href="">empty</a>
            <a>none</a>
            <img src="/logo.png">
            <a href="https://other.test/x">Other</a>
        </body></html>"#,
    )
    .await;

    mount_page(
        &server,
        "/page1",
        r#"<html><head><title>Page 1</title></head><body><img src="/a.jpg"><img src=""></body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/forbidden"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let urls = ["/", "/page1", "/forbidden", "/broken"]
        .iter()
        .map(|p| format!("{}{}", base, p))
        .collect();

    (server, urls)
}

fn find<'a>(pages: &'a [Page], url: &str) -> &'a Page {
    pages
        .iter()
        .find(|p| p.url == url)
        .unwrap_or_else(|| panic!("no result for {}", url))
}

#[tokio::test]
async fn test_sequential_scrape_of_site() {
    let (_server, urls) = start_site().await;
    let config = create_test_config();

    let pages = create_runner(&config)
        .run(ScrapeMode::Sequential, &CancellationToken::new(), &urls, 1)
        .await;

    assert_eq!(pages.len(), 4);
    let order: Vec<_> = pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(order, urls);

    let home = &pages[0];
    assert!(home.is_success());
    assert_eq!(home.title, "Home");
    assert_eq!(home.links, vec!["/page1", "https://other.test/x"]);
    assert_eq!(home.images, vec!["/logo.png"]);

    let page1 = &pages[1];
    assert_eq!(page1.title, "Page 1");
    assert!(page1.links.is_empty());
    assert_eq!(page1.images, vec!["/a.jpg"]);

    let forbidden = &pages[2];
    assert!(forbidden.has_error());
    assert!(forbidden.error.as_deref().unwrap().contains("fetch failed"));
    assert!(forbidden.error.as_deref().unwrap().contains("403"));

    assert!(pages[3].error.as_deref().unwrap().contains("500"));
}

#[tokio::test]
async fn test_parallel_scrape_of_site() {
    let (_server, urls) = start_site().await;
    let config = create_test_config();

    let pages = create_runner(&config)
        .run(
            ScrapeMode::Parallel,
            &CancellationToken::new(),
            &urls,
            config.scraper.concurrency as usize,
        )
        .await;

    assert_eq!(pages.len(), urls.len());
    let got: HashSet<_> = pages.iter().map(|p| p.url.clone()).collect();
    assert_eq!(got, urls.iter().cloned().collect());

    assert_eq!(find(&pages, &urls[0]).title, "Home");
    assert!(find(&pages, &urls[2]).has_error());

    let summary = RunSummary::from_pages(&pages, Duration::from_secs(1));
    assert_eq!(summary.successful, 2);
    assert_eq!(summary.failed(), 2);
}

#[tokio::test]
async fn test_both_modes_agree() {
    let (_server, urls) = start_site().await;
    let runner = create_runner(&create_test_config());
    let cancel = CancellationToken::new();

    let sequential = runner.run_sequential(&cancel, &urls).await;
    let parallel = runner.run_parallel(&cancel, &urls, 0).await;

    for url in &urls {
        let a = find(&sequential, url);
        let b = find(&parallel, url);
        assert_eq!(a.title, b.title);
        assert_eq!(a.links, b.links);
        assert_eq!(a.images, b.images);
        assert_eq!(a.is_success(), b.is_success());
    }
}

#[tokio::test]
async fn test_user_agent_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "TestBot/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<title>UA</title>"))
        .expect(1)
        .mount(&server)
        .await;

    let urls = vec![format!("{}/ua", server.uri())];
    let pages = create_runner(&create_test_config())
        .run_sequential(&CancellationToken::new(), &urls)
        .await;

    assert_eq!(pages[0].title, "UA");
}

#[tokio::test]
async fn test_progress_reporting_end_to_end() {
    let (_server, urls) = start_site().await;
    let progress = Arc::new(CountingProgress::default());

    let pages = create_runner(&create_test_config())
        .with_progress(progress.clone())
        .run_parallel(&CancellationToken::new(), &urls, 2)
        .await;

    assert_eq!(pages.len(), 4);
    assert_eq!(progress.trackers.load(Ordering::SeqCst), 4);
    assert_eq!(progress.increments.load(Ordering::SeqCst), 8);
    assert_eq!(progress.errored.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_timeout_is_recorded_as_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let fetcher = HttpFetcher::new(&FetcherConfig {
        timeout: Duration::from_millis(200),
        user_agent: "TestBot/1.0".to_string(),
    })
    .unwrap();
    let runner = ScrapeRunner::new(Arc::new(DefaultScraper::new(Arc::new(fetcher))));

    let pages = runner
        .run_sequential(&CancellationToken::new(), &[server.uri()])
        .await;

    assert_eq!(pages.len(), 1);
    let error = pages[0].error.as_deref().unwrap();
    assert!(error.starts_with("fetch failed"), "got {}", error);
}

#[tokio::test]
async fn test_cancellation_aborts_slow_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(10)))
        .mount(&server)
        .await;

    let config = Config {
        scraper: ScraperConfig {
            http_timeout_seconds: 30,
            ..create_test_config().scraper
        },
    };
    let urls: Vec<String> = (0..6).map(|i| format!("{}/slow{}", server.uri(), i)).collect();
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let pages = create_runner(&config)
        .run_parallel(&cancel, &urls, 2)
        .await;

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(pages.len(), 6);
    assert!(pages
        .iter()
        .all(|p| p.error.as_deref() == Some("fetch failed: request cancelled")));
}

#[tokio::test]
async fn test_urls_file_to_results_file() {
    let (_server, urls) = start_site().await;
    let dir = TempDir::new().unwrap();

    let urls_path = dir.path().join("urls.json");
    std::fs::write(&urls_path, serde_json::to_string(&urls).unwrap()).unwrap();
    let loaded = load_urls(&urls_path).unwrap();
    assert_eq!(loaded, urls);

    let pages = create_runner(&create_test_config())
        .run_sequential(&CancellationToken::new(), &loaded)
        .await;

    let out_dir = dir.path().join("output");
    let path = save_results_at(&out_dir, &pages, 1234).unwrap();
    assert!(path.ends_with("scrape-results-1234.json"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let records = json.as_array().unwrap();
    assert_eq!(records.len(), 4);
    assert_eq!(records[0]["title"], "Home");
    assert!(records[0].get("error").is_none());
    assert!(records[2]["error"]
        .as_str()
        .unwrap()
        .starts_with("fetch failed"));
}
