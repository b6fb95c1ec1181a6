//! Discovered/scraped bookkeeping that decides which links get fetched.
//!
//! A `Frontier` is plain data. The crawler owns exactly one per run and keeps it behind a
//! single mutex, so every mutation below happens at one point and two workers finding the
//! same link cannot both enqueue it.

use crate::normalize::{NormalizedUrl, normalize_url};
use crate::scope::ScopeRule;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Per-run crawl statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlCounters {
    pub pages_processed: usize,
    pub pages_filtered: usize,
    pub depth_exceeded: usize,
    pub duplicates_skipped: usize,
    pub newly_discovered: usize,
}

/// What the frontier decided for one discovered link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkDecision {
    /// In scope and never scraped; now marked scraped and must be fetched
    Enqueue,
    /// Outside the scope rule
    Filtered,
    /// In scope but already scraped
    Duplicate,
}

/// Result of asking to process a fetched page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAdmission {
    Admitted,
    CapReached,
}

#[derive(Debug, Default)]
pub struct Frontier {
    discovered: HashSet<NormalizedUrl>,
    scraped: HashSet<NormalizedUrl>,
    counters: CrawlCounters,
    max_pages: Option<usize>,
}

impl Frontier {
    pub fn new(max_pages: Option<usize>) -> Self {
        Self {
            max_pages,
            ..Default::default()
        }
    }

    /// Mark a seed as both discovered and scraped so it is never fetched twice.
    /// Returns false if the seed was already present.
    pub fn seed(&mut self, raw: &str) -> bool {
        let normalized = normalize_url(raw);
        self.discovered.insert(normalized.clone());
        self.scraped.insert(normalized)
    }

    /// Returns true the first time a URL is seen. Never gates a fetch.
    pub fn record_discovered(&mut self, url: &NormalizedUrl) -> bool {
        if self.discovered.contains(url) {
            return false;
        }
        self.discovered.insert(url.clone());
        self.counters.newly_discovered += 1;
        true
    }

    /// Returns true at most once per URL, marking it scraped at that moment.
    pub fn should_enqueue(&mut self, url: &NormalizedUrl) -> bool {
        if self.scraped.contains(url) {
            return false;
        }
        self.discovered.insert(url.clone());
        self.scraped.insert(url.clone());
        true
    }

    /// Route one absolute link: discover, then scope-check, then duplicate-check.
    pub fn consider_link(&mut self, raw: &str, scope: &ScopeRule) -> LinkDecision {
        let normalized = normalize_url(raw);
        self.record_discovered(&normalized);

        if !scope.matches(raw) {
            self.counters.pages_filtered += 1;
            return LinkDecision::Filtered;
        }

        if self.should_enqueue(&normalized) {
            LinkDecision::Enqueue
        } else {
            self.counters.duplicates_skipped += 1;
            LinkDecision::Duplicate
        }
    }

    pub fn record_depth_exceeded(&mut self) {
        self.counters.depth_exceeded += 1;
    }

    /// Check the page cap and count the page as processed if there is room.
    pub fn admit_page(&mut self) -> PageAdmission {
        if self.is_capped() {
            return PageAdmission::CapReached;
        }
        self.counters.pages_processed += 1;
        PageAdmission::Admitted
    }

    pub fn is_capped(&self) -> bool {
        self.max_pages
            .is_some_and(|max| self.counters.pages_processed >= max)
    }

    pub fn is_discovered(&self, url: &NormalizedUrl) -> bool {
        self.discovered.contains(url)
    }

    pub fn is_scraped(&self, url: &NormalizedUrl) -> bool {
        self.scraped.contains(url)
    }

    pub fn discovered_count(&self) -> usize {
        self.discovered.len()
    }

    pub fn scraped_count(&self) -> usize {
        self.scraped.len()
    }

    pub fn counters(&self) -> CrawlCounters {
        self.counters
    }
}
