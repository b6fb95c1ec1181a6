use crate::dedup::merge_records;
use crate::error::Result;
use crate::output::{prepare_output, write_records};
use indicatif::{ProgressBar, ProgressStyle};
use scopecrawl_scanner::{CrawlSummary, Crawler, PageRecord};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;
use url::Url;

/// Options for configuring a crawl operation
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub urls: Vec<String>,
    pub threads: usize,
    pub filter_depth: usize,
    pub max_depth: Option<usize>,
    pub max_pages: Option<usize>,
    pub timeout_secs: u64,
    pub output: PathBuf,
    pub show_progress_bars: bool,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            threads: 10,
            filter_depth: 1,
            max_depth: None,
            max_pages: Some(10_000),
            timeout_secs: 10,
            output: PathBuf::from("output.jsonl"),
            show_progress_bars: false,
        }
    }
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// What a finished crawl produced and where it went
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub summary: CrawlSummary,
    pub url_duplicates: usize,
    pub content_duplicates: usize,
    pub output: PathBuf,
    pub records: Vec<PageRecord>,
}

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// First path segment of a URL, or "/" for the root.
fn section_of(url: &str) -> String {
    extract_url_path(url)
        .split('/')
        .find(|s| !s.is_empty())
        .map(|s| format!("/{}", s))
        .unwrap_or_else(|| "/".to_string())
}

/// Crawl, merge and persist.
///
/// The output file is truncated before any request goes out, so an unwritable destination
/// fails the run without touching the network.
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlReport> {
    let CrawlOptions {
        urls,
        threads,
        filter_depth,
        max_depth,
        max_pages,
        timeout_secs,
        output,
        show_progress_bars,
    } = options;

    prepare_output(&output)?;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let processed_count = Arc::new(AtomicUsize::new(0));

    let internal_progress_callback: scopecrawl_scanner::ProgressCallback = {
        let pb = progress_bar.clone();
        let count = processed_count.clone();
        Arc::new(move |_worker_id: usize, _url: String| {
            let n = count.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb {
                pb.set_message(format!("Crawling... {} pages processed", n));
                pb.tick();
            }
        })
    };

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Crawling {} seed URL(s) with {} workers",
            urls.len(),
            threads
        ));
    }

    let crawler = Crawler::with_timeout(timeout_secs)
        .with_filter_depth(filter_depth)
        .with_max_depth(max_depth)
        .with_max_pages(max_pages)
        .with_progress_callback(internal_progress_callback);

    let crawl_output = crawler.crawl(&urls, threads).await;

    if let Some(ref pb) = progress_bar {
        let total = processed_count.load(Ordering::Relaxed);
        pb.finish_with_message(format!("Crawl complete! {} pages processed", total));
    }

    let crawl_output = crawl_output?;

    if let Some(ref callback) = progress_callback {
        callback(format!(
            "Merging {} collected records",
            crawl_output.records.len()
        ));
    }

    let merged = merge_records(crawl_output.records);
    info!(
        "Merge removed {} records ({} by URL, {} by content)",
        merged.removed(),
        merged.url_duplicates,
        merged.content_duplicates
    );

    write_records(&output, &merged.records)?;

    Ok(CrawlReport {
        summary: crawl_output.summary,
        url_duplicates: merged.url_duplicates,
        content_duplicates: merged.content_duplicates,
        output,
        records: merged.records,
    })
}

/// Generate a crawl report from a finished run
pub fn generate_crawl_report(report: &CrawlReport) -> String {
    let summary = &report.summary;
    let counters = &summary.counters;

    let mut out = String::new();
    out.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    out.push_str("# Summary:\n");
    out.push_str(&format!("  Pages processed: {}\n", counters.pages_processed));
    out.push_str(&format!("  Pages filtered out: {}\n", counters.pages_filtered));
    out.push_str(&format!(
        "  Pages exceeding max depth: {}\n",
        counters.depth_exceeded
    ));
    out.push_str(&format!(
        "  Duplicate URLs skipped: {}\n",
        counters.duplicates_skipped
    ));
    out.push_str(&format!("  Total URLs discovered: {}\n", summary.urls_discovered));
    out.push_str(&format!("  Total URLs scraped: {}\n", summary.urls_scraped));
    out.push_str(&format!("  Filter depth: {}\n", summary.filter_depth));
    out.push_str(&format!(
        "  Max depth: {}\n",
        summary
            .max_depth
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unlimited".to_string())
    ));
    out.push_str(&format!(
        "  Path filter: {}\n",
        summary.path_filter.as_deref().unwrap_or("none")
    ));

    out.push_str("\n# Merge:\n");
    out.push_str(&format!("  Records collected: {}\n", summary.records_collected));
    out.push_str(&format!("  URL duplicates removed: {}\n", report.url_duplicates));
    out.push_str(&format!(
        "  Content duplicates removed: {}\n",
        report.content_duplicates
    ));
    out.push_str(&format!(
        "  Records written: {} -> {}\n",
        report.records.len(),
        report.output.display()
    ));

    out.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    let mut by_section: BTreeMap<String, Vec<&PageRecord>> = BTreeMap::new();
    for record in &report.records {
        by_section
            .entry(section_of(&record.url))
            .or_default()
            .push(record);
    }

    for (section, records) in &by_section {
        out.push_str(&format!("## {}\n", section));
        out.push_str(&format!("  {} pages\n\n", records.len()));
        for record in records {
            let path = extract_url_path(&record.url);
            match record.title {
                Some(ref title) => {
                    out.push_str(&format!("  {} \x1b[90m{}\x1b[0m\n", path, title))
                }
                None => out.push_str(&format!("  {}\n", path)),
            }
        }
        out.push('\n');
    }

    out
}
