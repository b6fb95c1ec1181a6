pub mod analysis;
pub mod crawl;
pub mod dedup;
pub mod error;
pub mod merge;
pub mod output;

pub use analysis::{DuplicateAnalysis, analyze_duplicates, generate_analysis_report};
pub use crawl::{CrawlOptions, CrawlProgressCallback, CrawlReport, execute_crawl};
pub use dedup::{MergeOutcome, content_digest, merge_records, richness_score};
pub use error::CoreError;
pub use merge::{DedupeMode, MergeReport, dedupe, load_records};
