//! Duplicate pattern analysis for a produced record set.

use scopecrawl_scanner::{PageRecord, normalize_url};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const NO_TITLE: &str = "NO_TITLE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateAnalysis {
    pub total: usize,
    pub unique_urls: usize,
    /// Raw URLs occurring more than once, most common first
    pub repeated_urls: Vec<(String, usize)>,
    pub unique_normalized_urls: usize,
    pub repeated_normalized_urls: Vec<(String, usize)>,
    pub unique_titles: usize,
    pub repeated_titles: Vec<(String, usize)>,
    pub content_length: Option<ContentLengthStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentLengthStats {
    pub min: usize,
    pub max: usize,
    pub average: usize,
}

impl DuplicateAnalysis {
    pub fn recommendations(&self) -> Vec<String> {
        let mut tips = Vec::new();

        if self.unique_urls == self.total {
            tips.push("No URL duplicates found - data is already unique by URL".to_string());
        } else {
            tips.push(format!(
                "Found {} URL duplicates - consider URL-based deduplication",
                self.total - self.unique_urls
            ));
        }

        if self.unique_normalized_urls < self.unique_urls {
            tips.push(format!(
                "Found {} URL variations - consider normalized URL deduplication",
                self.unique_urls - self.unique_normalized_urls
            ));
        }

        if self.unique_titles < self.total {
            tips.push(format!(
                "Found {} title duplicates - consider content-based deduplication",
                self.total - self.unique_titles
            ));
        }

        tips
    }
}

pub fn analyze_duplicates(records: &[PageRecord]) -> DuplicateAnalysis {
    let urls = count_by(records.iter().map(|r| r.url.clone()));
    let normalized = count_by(records.iter().map(|r| normalize_url(&r.url).into_string()));
    let titles = count_by(
        records
            .iter()
            .map(|r| r.title.clone().unwrap_or_else(|| NO_TITLE.to_string())),
    );

    let lengths: Vec<usize> = records.iter().map(content_length).collect();
    let content_length = match (lengths.iter().min(), lengths.iter().max()) {
        (Some(&min), Some(&max)) => Some(ContentLengthStats {
            min,
            max,
            average: lengths.iter().sum::<usize>() / lengths.len(),
        }),
        _ => None,
    };

    DuplicateAnalysis {
        total: records.len(),
        unique_urls: urls.len(),
        repeated_urls: most_common_repeats(&urls, 10),
        unique_normalized_urls: normalized.len(),
        repeated_normalized_urls: most_common_repeats(&normalized, 10),
        unique_titles: titles.len(),
        repeated_titles: most_common_repeats(&titles, 5),
        content_length,
    }
}

pub fn generate_analysis_report(analysis: &DuplicateAnalysis) -> String {
    let mut report = String::new();
    report.push_str(&format!("Analyzing {} records...\n", analysis.total));
    report.push_str(&"=".repeat(60));
    report.push('\n');

    report.push_str("\n# URL Analysis:\n");
    report.push_str(&format!("  Total records: {}\n", analysis.total));
    report.push_str(&format!("  Unique URLs: {}\n", analysis.unique_urls));
    report.push_str(&format!("  Duplicate URLs: {}\n", analysis.repeated_urls.len()));
    push_repeats(&mut report, "Most common URLs", &analysis.repeated_urls);

    report.push_str("\n# Normalized URL Analysis:\n");
    report.push_str(&format!(
        "  Unique normalized URLs: {}\n",
        analysis.unique_normalized_urls
    ));
    report.push_str(&format!(
        "  Duplicate normalized URLs: {}\n",
        analysis.repeated_normalized_urls.len()
    ));
    push_repeats(
        &mut report,
        "Most common normalized URLs",
        &analysis.repeated_normalized_urls,
    );

    report.push_str("\n# Title Analysis:\n");
    report.push_str(&format!("  Unique titles: {}\n", analysis.unique_titles));
    report.push_str(&format!("  Duplicate titles: {}\n", analysis.repeated_titles.len()));
    let truncated: Vec<(String, usize)> = analysis
        .repeated_titles
        .iter()
        .map(|(title, count)| (title.chars().take(80).collect(), *count))
        .collect();
    push_repeats(&mut report, "Most common titles", &truncated);

    if let Some(stats) = analysis.content_length {
        report.push_str("\n# Content Length Analysis:\n");
        report.push_str(&format!("  Average content length: {} chars\n", stats.average));
        report.push_str(&format!("  Min content length: {} chars\n", stats.min));
        report.push_str(&format!("  Max content length: {} chars\n", stats.max));
    }

    report.push_str("\n# Recommendations:\n");
    for tip in analysis.recommendations() {
        report.push_str(&format!("  - {}\n", tip));
    }

    report
}

fn push_repeats(report: &mut String, heading: &str, repeats: &[(String, usize)]) {
    if repeats.is_empty() {
        return;
    }
    report.push_str(&format!("\n  {}:\n", heading));
    for (value, count) in repeats {
        report.push_str(&format!("    {}x: {}\n", count, value));
    }
}

fn count_by(values: impl Iterator<Item = String>) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
    }
    counts
}

/// Entries seen more than once, highest count first, ties alphabetical.
fn most_common_repeats(counts: &HashMap<String, usize>, limit: usize) -> Vec<(String, usize)> {
    let mut repeats: Vec<(String, usize)> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(value, count)| (value.clone(), *count))
        .collect();
    repeats.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    repeats.truncate(limit);
    repeats
}

/// Serialized size of the structural content fields.
fn content_length(record: &PageRecord) -> usize {
    let content = &record.content;
    [
        serde_json::to_string(&content.headings),
        serde_json::to_string(&content.paragraphs),
        serde_json::to_string(&content.lists),
        serde_json::to_string(&content.links),
        serde_json::to_string(&content.images),
        serde_json::to_string(&content.tables),
    ]
    .into_iter()
    .map(|json| json.map(|s| s.len()).unwrap_or(0))
    .sum()
}
