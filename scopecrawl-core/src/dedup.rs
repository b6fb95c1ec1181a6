//! Post-crawl merge: URL grouping, richness scoring and content-digest dedup.

use scopecrawl_scanner::{NormalizedUrl, PageRecord, normalize_url};
use sha2::{Digest, Sha256};
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Characters of each paragraph that take part in the content digest.
const DIGEST_PARAGRAPH_CHARS: usize = 100;

/// Hash over headings, paragraph openings and title. Records with equal digests are
/// considered the same content regardless of URL.
pub fn content_digest(record: &PageRecord) -> String {
    let mut canonical = String::new();

    for heading in &record.content.headings {
        let _ = writeln!(canonical, "h{}:{}", heading.level, heading.text);
    }
    for paragraph in &record.content.paragraphs {
        canonical.extend(paragraph.chars().take(DIGEST_PARAGRAPH_CHARS));
        canonical.push('\n');
    }
    if let Some(ref title) = record.title {
        let _ = writeln!(canonical, "title:{}", title);
    }

    hex::encode(Sha256::digest(canonical.as_bytes()))
}

/// Weighted count of structural elements; tables weigh most, links and images least.
pub fn richness_score(record: &PageRecord) -> usize {
    let content = &record.content;
    content.headings.len() * 2
        + content.paragraphs.len() * 3
        + content.lists.len() * 2
        + content.links.len()
        + content.images.len()
        + content.tables.len() * 5
}

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    /// Surviving records sorted by raw URL
    pub records: Vec<PageRecord>,
    /// Records dropped because a richer record shared their normalized URL
    pub url_duplicates: usize,
    /// Records dropped because an earlier survivor had the same content digest
    pub content_duplicates: usize,
}

impl MergeOutcome {
    pub fn removed(&self) -> usize {
        self.url_duplicates + self.content_duplicates
    }
}

/// Reduce records sharing a normalized URL to the highest scoring one (first wins ties),
/// then drop later records whose content digest was already seen, then sort by URL.
pub fn merge_records(records: Vec<PageRecord>) -> MergeOutcome {
    let total = records.len();
    let best = best_per_url(records);
    let url_duplicates = total - best.len();

    let (mut kept, content_duplicates) = drop_repeated_content(best);
    kept.sort_by(|a, b| a.url.cmp(&b.url));

    MergeOutcome {
        records: kept,
        url_duplicates,
        content_duplicates,
    }
}

/// Richest record per normalized URL, in first-seen group order.
pub fn best_per_url(records: Vec<PageRecord>) -> Vec<PageRecord> {
    let mut index: HashMap<NormalizedUrl, usize> = HashMap::new();
    let mut groups: Vec<(usize, PageRecord)> = Vec::new();

    for record in records {
        let key = normalize_url(&record.url);
        let score = richness_score(&record);
        match index.get(&key) {
            Some(&slot) => {
                if score > groups[slot].0 {
                    groups[slot] = (score, record);
                }
            }
            None => {
                index.insert(key, groups.len());
                groups.push((score, record));
            }
        }
    }

    groups.into_iter().map(|(_, record)| record).collect()
}

/// Keep the first record for each content digest. Returns survivors and the drop count.
pub fn drop_repeated_content(records: Vec<PageRecord>) -> (Vec<PageRecord>, usize) {
    let mut seen = HashSet::new();
    let mut dropped = 0;
    let kept = records
        .into_iter()
        .filter(|record| {
            if seen.insert(content_digest(record)) {
                true
            } else {
                dropped += 1;
                false
            }
        })
        .collect();
    (kept, dropped)
}
