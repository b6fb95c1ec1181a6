//! Offline batch transforms over an already produced record set.

use crate::dedup::merge_records;
use crate::error::{CoreError, Result};
use scopecrawl_scanner::{PageRecord, ScopeRule, normalize_url};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupeMode {
    /// First record per normalized URL
    Url,
    /// Richest record per normalized URL, then content-digest dedup
    Content,
    /// Scope filter, URL dedup, sorted compact output
    Scoped,
}

impl DedupeMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "url" | "simple" => Some(DedupeMode::Url),
            "content" | "full" => Some(DedupeMode::Content),
            "scoped" | "compact" => Some(DedupeMode::Scoped),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DedupeMode::Url => "url",
            DedupeMode::Content => "content",
            DedupeMode::Scoped => "scoped",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeReport {
    pub original: usize,
    pub kept: usize,
    pub url_duplicates: usize,
    pub content_duplicates: usize,
    pub filtered: usize,
}

impl MergeReport {
    pub fn removed(&self) -> usize {
        self.original - self.kept
    }

    pub fn reduction_percent(&self) -> f64 {
        if self.original == 0 {
            return 0.0;
        }
        self.removed() as f64 / self.original as f64 * 100.0
    }
}

/// Parse either a JSON array of records or one record per line.
pub fn parse_records(text: &str, source: &Path) -> Result<Vec<PageRecord>> {
    let trimmed = text.trim_start();
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| CoreError::Json {
            path: source.to_path_buf(),
            line: e.line(),
            source: e,
        });
    }

    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|e| CoreError::Json {
                path: source.to_path_buf(),
                line: idx + 1,
                source: e,
            })
        })
        .collect()
}

pub fn load_records(path: &Path) -> Result<Vec<PageRecord>> {
    let text = fs::read_to_string(path).map_err(|e| CoreError::io(path, e))?;
    let records = parse_records(&text, path)?;
    debug!("Loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Keep the first record seen for each normalized URL, preserving input order.
pub fn dedupe_by_url(records: Vec<PageRecord>) -> (Vec<PageRecord>, MergeReport) {
    let original = records.len();
    let mut seen = HashSet::new();
    let kept: Vec<PageRecord> = records
        .into_iter()
        .filter(|record| seen.insert(normalize_url(&record.url)))
        .collect();

    let report = MergeReport {
        original,
        kept: kept.len(),
        url_duplicates: original - kept.len(),
        ..Default::default()
    };
    (kept, report)
}

/// URL grouping with richness scoring plus content-digest dedup.
pub fn dedupe_by_content(records: Vec<PageRecord>) -> (Vec<PageRecord>, MergeReport) {
    let original = records.len();
    let outcome = merge_records(records);
    let report = MergeReport {
        original,
        kept: outcome.records.len(),
        url_duplicates: outcome.url_duplicates,
        content_duplicates: outcome.content_duplicates,
        filtered: 0,
    };
    (outcome.records, report)
}

/// Drop records outside the scope of `seed_url`, dedup by URL and sort by URL.
pub fn dedupe_scoped(
    records: Vec<PageRecord>,
    seed_url: &str,
    filter_depth: usize,
) -> (Vec<PageRecord>, MergeReport) {
    let original = records.len();
    let rule = ScopeRule::from_seed(seed_url, filter_depth);

    let in_scope: Vec<PageRecord> = records
        .into_iter()
        .filter(|record| rule.matches(&record.url))
        .collect();
    let filtered = original - in_scope.len();

    let (mut kept, url_report) = dedupe_by_url(in_scope);
    kept.sort_by(|a, b| a.url.cmp(&b.url));

    let report = MergeReport {
        original,
        kept: kept.len(),
        url_duplicates: url_report.url_duplicates,
        content_duplicates: 0,
        filtered,
    };
    (kept, report)
}

/// Apply `mode` to `records`. `Scoped` needs a seed URL.
pub fn dedupe(
    records: Vec<PageRecord>,
    mode: DedupeMode,
    seed_url: Option<&str>,
    filter_depth: usize,
) -> Result<(Vec<PageRecord>, MergeReport)> {
    match mode {
        DedupeMode::Url => Ok(dedupe_by_url(records)),
        DedupeMode::Content => Ok(dedupe_by_content(records)),
        DedupeMode::Scoped => {
            let seed = seed_url.ok_or_else(|| {
                CoreError::InvalidInput("scoped dedupe requires a seed URL".to_string())
            })?;
            Ok(dedupe_scoped(records, seed, filter_depth))
        }
    }
}
