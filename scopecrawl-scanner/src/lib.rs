pub mod crawler;
pub mod error;
pub mod extract;
pub mod frontier;
pub mod normalize;
pub mod record;
pub mod result;
pub mod scope;

pub use crawler::{Crawler, ProgressCallback};
pub use error::ScanError;
pub use frontier::{CrawlCounters, Frontier, LinkDecision};
pub use normalize::{NormalizedUrl, normalize_url};
pub use record::PageRecord;
pub use result::{CrawlOutput, CrawlSummary};
pub use scope::ScopeRule;
