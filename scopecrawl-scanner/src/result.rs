use crate::frontier::CrawlCounters;
use crate::record::PageRecord;
use serde::{Deserialize, Serialize};
use tracing::info;

/// End-of-run statistics for one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub counters: CrawlCounters,
    pub urls_discovered: usize,
    pub urls_scraped: usize,
    pub records_collected: usize,
    pub filter_depth: usize,
    pub max_depth: Option<usize>,
    pub max_pages: Option<usize>,
    pub path_filter: Option<String>,
}

impl CrawlSummary {
    pub fn log(&self) {
        info!("Crawl finished. Summary:");
        info!("  - Pages processed: {}", self.counters.pages_processed);
        info!("  - Pages filtered out: {}", self.counters.pages_filtered);
        info!("  - Pages exceeding max depth: {}", self.counters.depth_exceeded);
        info!("  - Duplicate URLs skipped: {}", self.counters.duplicates_skipped);
        info!("  - Total URLs discovered: {}", self.urls_discovered);
        info!("  - Total URLs scraped: {}", self.urls_scraped);
        info!("  - Filter depth: {}", self.filter_depth);
        info!("  - Max depth: {:?}", self.max_depth);
        info!("  - Path filter: {:?}", self.path_filter);
    }
}

/// Everything a finished crawl hands back: raw records in collection order plus statistics.
#[derive(Debug, Clone, Default)]
pub struct CrawlOutput {
    pub records: Vec<PageRecord>,
    pub summary: CrawlSummary,
}
