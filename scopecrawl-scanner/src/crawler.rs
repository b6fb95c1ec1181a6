use crate::error::{Result, ScanError};
use crate::extract::PageDocument;
use crate::frontier::{Frontier, LinkDecision, PageAdmission};
use crate::record::PageRecord;
use crate::result::{CrawlOutput, CrawlSummary};
use crate::scope::ScopeRule;
use futures::future::join_all;
use reqwest::Client;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex as StdMutex, MutexGuard};
use tokio::sync::{Mutex, Notify};
use tracing::{debug, info, warn};
use url::Url;

pub type ProgressCallback = Arc<dyn Fn(usize, String) + Send + Sync>;

/// Path suffixes that never lead to content pages.
const SKIPPED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg"];

pub struct Crawler {
    filter_depth: usize,
    max_depth: Option<usize>,
    max_pages: Option<usize>,
    progress_callback: Option<ProgressCallback>,
    timeout_secs: u64,
}

/// One unit of work: a URL to fetch and how many hops it is from a seed.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CrawlTask {
    url: String,
    depth: usize,
}

/// Run-scoped state shared by every worker of one crawl.
struct CrawlContext {
    client: Client,
    frontier: Mutex<Frontier>,
    records: Mutex<Vec<PageRecord>>,
    scope: ScopeRule,
    host: String,
    max_depth: Option<usize>,
}

struct QueueState {
    pending: VecDeque<CrawlTask>,
    in_flight: usize,
}

/// Shared queue of crawl tasks. The crawl is over once nothing is pending and nothing is
/// in flight; every task handed out by `next` must be returned through `complete`.
struct WorkQueue {
    state: StdMutex<QueueState>,
    notify: Notify,
}

impl WorkQueue {
    fn new(initial: Vec<CrawlTask>) -> Self {
        Self {
            state: StdMutex::new(QueueState {
                pending: initial.into(),
                in_flight: 0,
            }),
            notify: Notify::new(),
        }
    }

    async fn next(&self) -> Option<CrawlTask> {
        loop {
            // Register before checking so a completion between the check and the await
            // still wakes us.
            let notified = self.notify.notified();
            {
                let mut state = self.lock_state();
                if let Some(task) = state.pending.pop_front() {
                    state.in_flight += 1;
                    return Some(task);
                }
                if state.in_flight == 0 {
                    drop(state);
                    self.notify.notify_waiters();
                    return None;
                }
            }
            notified.await;
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn complete(&self, children: Vec<CrawlTask>) {
        {
            let mut state = self.lock_state();
            state.pending.extend(children);
            state.in_flight = state.in_flight.saturating_sub(1);
        }
        self.notify.notify_waiters();
    }
}

/// Returns a task to the queue when dropped, so a panicking worker still releases its
/// in-flight slot.
struct TaskGuard<'a> {
    queue: &'a WorkQueue,
    children: Vec<CrawlTask>,
}

impl<'a> TaskGuard<'a> {
    fn new(queue: &'a WorkQueue) -> Self {
        Self {
            queue,
            children: Vec::new(),
        }
    }
}

impl Drop for TaskGuard<'_> {
    fn drop(&mut self) {
        self.queue.complete(std::mem::take(&mut self.children));
    }
}

impl Crawler {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            filter_depth: 1,
            max_depth: None,
            max_pages: None,
            progress_callback: None,
            timeout_secs,
        }
    }

    /// Number of leading seed path segments a link must share to be followed. 0 disables.
    pub fn with_filter_depth(mut self, depth: usize) -> Self {
        self.filter_depth = depth;
        self
    }

    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_max_pages(mut self, pages: Option<usize>) -> Self {
        self.max_pages = pages;
        self
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    fn build_client(&self) -> Result<Client> {
        let client = Client::builder()
            .user_agent(concat!("scopecrawl/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(self.timeout_secs))
            .connect_timeout(std::time::Duration::from_secs(self.timeout_secs.div_ceil(2)))
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .tcp_keepalive(std::time::Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;
        Ok(client)
    }

    /// Crawl from `seeds` with a pool of `workers` tasks.
    ///
    /// The scope rule and the allowed host both come from the first seed. Every call starts
    /// from fresh frontier state.
    pub async fn crawl(&self, seeds: &[String], workers: usize) -> Result<CrawlOutput> {
        let first_seed = seeds
            .first()
            .ok_or_else(|| ScanError::InvalidUrl("No seed URLs given".to_string()))?;

        let parsed_seed = Url::parse(first_seed)
            .map_err(|e| ScanError::InvalidUrl(format!("{}: {}", first_seed, e)))?;
        let host = parsed_seed
            .host_str()
            .ok_or_else(|| ScanError::InvalidUrl(format!("{} has no host", first_seed)))?
            .to_string();

        let scope = ScopeRule::from_seed(first_seed, self.filter_depth);
        let workers = workers.max(1);

        info!(
            "Starting crawl of {} seed(s) on {} with {} workers (filter_depth={}, max_depth={:?}, max_pages={:?}, path_filter={:?})",
            seeds.len(),
            host,
            workers,
            self.filter_depth,
            self.max_depth,
            self.max_pages,
            scope.prefix()
        );

        let mut frontier = Frontier::new(self.max_pages);
        let mut initial = Vec::new();
        for seed in seeds {
            Url::parse(seed).map_err(|e| ScanError::InvalidUrl(format!("{}: {}", seed, e)))?;
            if frontier.seed(seed) {
                initial.push(CrawlTask {
                    url: seed.clone(),
                    depth: 0,
                });
            }
        }

        let path_filter = scope.prefix().map(str::to_string);
        let context = Arc::new(CrawlContext {
            client: self.build_client()?,
            frontier: Mutex::new(frontier),
            records: Mutex::new(Vec::new()),
            scope,
            host,
            max_depth: self.max_depth,
        });
        let queue = Arc::new(WorkQueue::new(initial));

        let handles = (0..workers).map(|worker_id| {
            let context = context.clone();
            let queue = queue.clone();
            let progress_cb = self.progress_callback.clone();

            tokio::spawn(async move {
                debug!("Worker {} started", worker_id);
                while let Some(task) = queue.next().await {
                    if let Some(ref callback) = progress_cb {
                        callback(worker_id, task.url.clone());
                    }
                    let mut guard = TaskGuard::new(&queue);
                    guard.children = Self::process_task(&context, task).await;
                    drop(guard);
                }
                debug!("Worker {} finished", worker_id);
            })
        });

        for handle in join_all(handles).await {
            handle?;
        }

        let records = std::mem::take(&mut *context.records.lock().await);
        let frontier = context.frontier.lock().await;
        let summary = CrawlSummary {
            counters: frontier.counters(),
            urls_discovered: frontier.discovered_count(),
            urls_scraped: frontier.scraped_count(),
            records_collected: records.len(),
            filter_depth: self.filter_depth,
            max_depth: self.max_depth,
            max_pages: self.max_pages,
            path_filter,
        };
        drop(frontier);

        summary.log();
        Ok(CrawlOutput { records, summary })
    }

    /// Run one branch: fetch, extract, discover. Returns the newly enqueued child tasks.
    async fn process_task(context: &CrawlContext, task: CrawlTask) -> Vec<CrawlTask> {
        if context.frontier.lock().await.is_capped() {
            debug!("Page limit reached, dropping {}", task.url);
            return Vec::new();
        }

        if let Some(max_depth) = context.max_depth
            && task.depth > max_depth
        {
            context.frontier.lock().await.record_depth_exceeded();
            info!(
                "Max depth exceeded ({} > {}) for URL: {}",
                task.depth, max_depth, task.url
            );
            return Vec::new();
        }

        let body = match Self::fetch_page(&context.client, &task.url).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Crawl error for {}: {}", task.url, e);
                return Vec::new();
            }
        };

        {
            let mut frontier = context.frontier.lock().await;
            if frontier.admit_page() == PageAdmission::CapReached {
                info!("Maximum page limit reached, not processing {}", task.url);
                return Vec::new();
            }
            info!(
                "Processing page {}: {} (depth: {}) - Total discovered: {}, Total scraped: {}",
                frontier.counters().pages_processed,
                task.url,
                task.depth,
                frontier.discovered_count(),
                frontier.scraped_count()
            );
        }

        let (record, links) = Self::process_page(&body, &task.url);
        context.records.lock().await.push(record);

        let mut children = Vec::new();
        let (mut filtered, mut duplicates) = (0usize, 0usize);
        {
            let mut frontier = context.frontier.lock().await;
            for link in links {
                if !Self::is_crawlable_link(&link, &context.host) {
                    continue;
                }
                match frontier.consider_link(&link, &context.scope) {
                    LinkDecision::Enqueue => children.push(CrawlTask {
                        url: link,
                        depth: task.depth + 1,
                    }),
                    LinkDecision::Filtered => filtered += 1,
                    LinkDecision::Duplicate => duplicates += 1,
                }
            }
        }

        if !children.is_empty() || filtered > 0 || duplicates > 0 {
            info!(
                "Links on {}: {} followed, {} filtered out, {} duplicates skipped",
                task.url,
                children.len(),
                filtered,
                duplicates
            );
        }

        children
    }

    async fn fetch_page(client: &Client, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = client.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());

        let is_html = content_type
            .as_ref()
            .map(|ct| ct.contains("text/html"))
            .unwrap_or(false);

        if !is_html {
            return Err(ScanError::UnsupportedContent {
                url: url.to_string(),
                content_type: content_type.unwrap_or_else(|| "unknown".to_string()),
            });
        }

        Ok(response.text().await?)
    }

    /// Extract the record and outbound links of one page.
    ///
    /// An extraction failure yields an empty record; links are still returned when the
    /// document itself parsed.
    fn process_page(body: &str, url: &str) -> (PageRecord, Vec<String>) {
        let document = match PageDocument::parse(body, url) {
            Ok(document) => document,
            Err(e) => {
                warn!("Extraction failed for {}: {}", url, e);
                return (PageRecord::new(url.to_string()), Vec::new());
            }
        };

        let record = document.extract().unwrap_or_else(|e| {
            warn!("Extraction failed for {}: {}", url, e);
            PageRecord::new(url.to_string())
        });

        let links = document.outbound_links().unwrap_or_else(|e| {
            warn!("Link discovery failed for {}: {}", url, e);
            Vec::new()
        });

        debug!("Collected data for {}", url);
        (record, links)
    }

    /// Same host, http(s), and not an image or document by extension.
    fn is_crawlable_link(url: &str, host: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        if !matches!(parsed.scheme(), "http" | "https") {
            return false;
        }
        if parsed.host_str() != Some(host) {
            return false;
        }
        let path = parsed.path().to_ascii_lowercase();
        !SKIPPED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
    }
}

impl Default for Crawler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path},
    };

    fn html_page(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(
            format!("<html><body>{}</body></html>", body),
            "text/html; charset=utf-8",
        )
    }

    async fn mount_page(server: &MockServer, route: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page(body))
            .mount(server)
            .await;
    }

    async fn mount_page_expecting(server: &MockServer, route: &str, body: &str, hits: u64) {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page(body))
            .expect(hits)
            .mount(server)
            .await;
    }

    fn record_paths(output: &CrawlOutput) -> HashSet<String> {
        output
            .records
            .iter()
            .map(|r| Url::parse(&r.url).unwrap().path().to_string())
            .collect()
    }

    #[test]
    fn test_is_crawlable_link() {
        assert!(Crawler::is_crawlable_link("https://x.com/d4/a", "x.com"));
        assert!(!Crawler::is_crawlable_link("https://y.com/d4/a", "x.com"));
        assert!(!Crawler::is_crawlable_link("https://sub.x.com/d4/a", "x.com"));
        assert!(!Crawler::is_crawlable_link("ftp://x.com/d4/a", "x.com"));
        assert!(!Crawler::is_crawlable_link("https://x.com/guide.PDF", "x.com"));
        assert!(!Crawler::is_crawlable_link("https://x.com/img/map.webp", "x.com"));
        assert!(Crawler::is_crawlable_link("https://x.com/pdf-guide", "x.com"));
    }

    #[test]
    fn test_process_page_collects_record_and_links() {
        let (record, links) = Crawler::process_page(
            r#"<html><head><title>T</title></head><body><a href="/next">Next</a></body></html>"#,
            "https://x.com/start",
        );
        assert_eq!(record.title.as_deref(), Some("T"));
        assert_eq!(links, vec!["https://x.com/next"]);
    }

    #[test]
    fn test_process_page_bad_url_gives_empty_record() {
        let (record, links) = Crawler::process_page("<html></html>", "::not-a-url::");
        assert!(record.is_empty());
        assert_eq!(record.url, "::not-a-url::");
        assert!(links.is_empty());
    }

    #[tokio::test]
    async fn test_work_queue_drains() {
        let queue = WorkQueue::new(vec![CrawlTask {
            url: "a".to_string(),
            depth: 0,
        }]);
        let first = queue.next().await.unwrap();
        assert_eq!(first.url, "a");
        queue.complete(vec![CrawlTask {
            url: "b".to_string(),
            depth: 1,
        }]);
        let second = queue.next().await.unwrap();
        assert_eq!(second.depth, 1);
        queue.complete(Vec::new());
        assert!(queue.next().await.is_none());
    }

    #[tokio::test]
    async fn test_panicking_task_releases_its_slot() {
        let queue = Arc::new(WorkQueue::new(vec![CrawlTask {
            url: "a".to_string(),
            depth: 0,
        }]));
        assert!(queue.next().await.is_some());

        let worker_queue = queue.clone();
        let result = tokio::spawn(async move {
            let _guard = TaskGuard::new(&worker_queue);
            panic!("extraction blew up");
        })
        .await;
        assert!(result.is_err());

        let next = tokio::time::timeout(std::time::Duration::from_secs(5), queue.next())
            .await
            .expect("queue should not hang");
        assert!(next.is_none());
    }

    #[tokio::test]
    async fn test_fetch_page_accepts_html_with_charset() {
        let mock_server = MockServer::start().await;
        mount_page(&mock_server, "/", "<p>Hello there</p>").await;

        let client = Crawler::new().build_client().unwrap();
        let body = Crawler::fetch_page(&client, &mock_server.uri())
            .await
            .unwrap();
        assert!(body.contains("Hello there"));
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_html() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
            .mount(&mock_server)
            .await;

        let client = Crawler::new().build_client().unwrap();
        let result = Crawler::fetch_page(&client, &mock_server.uri()).await;
        assert!(matches!(
            result,
            Err(ScanError::UnsupportedContent { ref content_type, .. }) if content_type == "application/json"
        ));
    }

    #[tokio::test]
    async fn test_link_discovery() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/",
            &format!(r#"<a href="{uri}/page1">Page 1</a><a href="{uri}/page2">Page 2</a>"#),
        )
        .await;
        mount_page(&mock_server, "/page1", "<p>First page content here</p>").await;
        mount_page(&mock_server, "/page2", "<p>Second page content here</p>").await;

        let crawler = Crawler::new();
        let output = crawler.crawl(&[uri.clone()], 2).await.unwrap();

        assert_eq!(output.records.len(), 3);
        assert_eq!(
            record_paths(&output),
            HashSet::from(["/".to_string(), "/page1".to_string(), "/page2".to_string()])
        );
        assert_eq!(output.summary.counters.pages_processed, 3);
        assert_eq!(output.summary.urls_scraped, 3);
    }

    #[tokio::test]
    async fn test_seed_is_never_refetched() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page_expecting(&mock_server, "/", r#"<a href="/a">A</a>"#, 1).await;
        mount_page_expecting(
            &mock_server,
            "/a",
            r#"<a href="/">Home</a><a href="/#top">Top</a><a href="/a">Self</a>"#,
            1,
        )
        .await;

        let output = Crawler::new().crawl(&[format!("{uri}/")], 3).await.unwrap();

        assert_eq!(output.records.len(), 2);
        assert_eq!(output.summary.counters.duplicates_skipped, 3);
    }

    #[tokio::test]
    async fn test_page_cap_stops_crawl() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        let mut root = String::new();
        for i in 1..=10 {
            root.push_str(&format!(r#"<a href="/page{i}">Page {i}</a>"#));
            mount_page(&mock_server, &format!("/page{i}"), "<p>Some page content</p>").await;
        }
        mount_page(&mock_server, "/", &root).await;

        let crawler = Crawler::new().with_max_pages(Some(3));
        let output = crawler.crawl(&[uri], 4).await.unwrap();

        assert_eq!(output.records.len(), 3);
        assert_eq!(output.summary.counters.pages_processed, 3);
        // Every link was still discovered and enqueued once
        assert_eq!(output.summary.urls_scraped, 11);
    }

    #[tokio::test]
    async fn test_depth_exceeded_is_counted_and_not_followed() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(&mock_server, "/", r#"<a href="/a">A</a>"#).await;
        mount_page(&mock_server, "/a", r#"<a href="/b">B</a>"#).await;
        mount_page_expecting(&mock_server, "/b", r#"<a href="/c">C</a>"#, 0).await;
        mount_page_expecting(&mock_server, "/c", "<p>Never reached here</p>", 0).await;

        let crawler = Crawler::new().with_max_depth(Some(1));
        let output = crawler.crawl(&[uri], 2).await.unwrap();

        assert_eq!(
            record_paths(&output),
            HashSet::from(["/".to_string(), "/a".to_string()])
        );
        assert_eq!(output.summary.counters.depth_exceeded, 1);
        assert_eq!(output.summary.counters.pages_processed, 2);
    }

    #[tokio::test]
    async fn test_scope_filter_limits_crawl() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/docs/start",
            r#"<a href="/docs/install">Install</a><a href="/blog/news">News</a>"#,
        )
        .await;
        mount_page(&mock_server, "/docs/install", r#"<a href="/blog/news">News</a>"#).await;
        mount_page_expecting(&mock_server, "/blog/news", "<p>Out of scope page</p>", 0).await;

        let crawler = Crawler::new().with_filter_depth(1);
        let output = crawler
            .crawl(&[format!("{uri}/docs/start")], 2)
            .await
            .unwrap();

        assert_eq!(
            record_paths(&output),
            HashSet::from(["/docs/start".to_string(), "/docs/install".to_string()])
        );
        assert_eq!(output.summary.counters.pages_filtered, 2);
        assert_eq!(output.summary.path_filter.as_deref(), Some("docs"));
        assert!(output.summary.urls_scraped <= output.summary.urls_discovered);
    }

    #[tokio::test]
    async fn test_shared_link_fetched_once() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/",
            r#"<a href="/left">L</a><a href="/right">R</a>"#,
        )
        .await;
        mount_page(&mock_server, "/left", r#"<a href="/shared#one">S</a>"#).await;
        mount_page(&mock_server, "/right", r#"<a href="/shared#two">S</a>"#).await;
        mount_page_expecting(&mock_server, "/shared", "<p>Shared page content</p>", 1).await;

        let output = Crawler::new().crawl(&[uri], 4).await.unwrap();

        assert_eq!(output.records.len(), 4);
        assert_eq!(output.summary.counters.duplicates_skipped, 1);
    }

    #[tokio::test]
    async fn test_fetch_failure_does_not_abort_crawl() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/",
            r#"<a href="/missing">Gone</a><a href="/data.json">Data</a><a href="/ok">Ok</a>"#,
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .expect(1)
            .mount(&mock_server)
            .await;
        mount_page(&mock_server, "/ok", "<p>This one works fine</p>").await;

        let output = Crawler::new().crawl(&[uri], 2).await.unwrap();

        assert_eq!(
            record_paths(&output),
            HashSet::from(["/".to_string(), "/ok".to_string()])
        );
        // Failed pages stay marked as scraped
        assert_eq!(output.summary.urls_scraped, 4);
        assert_eq!(output.summary.counters.pages_processed, 2);
    }

    #[tokio::test]
    async fn test_non_content_links_skipped() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page(
            &mock_server,
            "/",
            r#"<a href="/guide.pdf">PDF</a><a href="/map.png">Map</a><a href="mailto:a@b.c">Mail</a><a href="https://elsewhere.example/x">Away</a>"#,
        )
        .await;
        mount_page_expecting(&mock_server, "/guide.pdf", "", 0).await;
        mount_page_expecting(&mock_server, "/map.png", "", 0).await;

        let output = Crawler::new().crawl(&[uri], 1).await.unwrap();

        assert_eq!(output.records.len(), 1);
        assert_eq!(output.summary.urls_discovered, 1);
        // Extracted links still list everything with text
        assert_eq!(output.records[0].content.links.len(), 4);
    }

    #[tokio::test]
    async fn test_no_seeds_is_an_error() {
        let result = Crawler::new().crawl(&[], 1).await;
        assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_invalid_seed_is_an_error() {
        let result = Crawler::new().crawl(&["not a url".to_string()], 1).await;
        assert!(matches!(result, Err(ScanError::InvalidUrl(_))));
    }

    #[tokio::test]
    async fn test_each_run_starts_fresh() {
        let mock_server = MockServer::start().await;
        let uri = mock_server.uri();

        mount_page_expecting(&mock_server, "/", r#"<a href="/a">A</a>"#, 2).await;
        mount_page_expecting(&mock_server, "/a", "<p>Page A content</p>", 2).await;

        let crawler = Crawler::new();
        let first = crawler.crawl(&[uri.clone()], 2).await.unwrap();
        let second = crawler.crawl(&[uri], 2).await.unwrap();

        assert_eq!(first.records.len(), 2);
        assert_eq!(second.records.len(), 2);
        assert_eq!(first.summary.counters, second.summary.counters);
    }
}
