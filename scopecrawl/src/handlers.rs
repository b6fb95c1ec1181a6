use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use scopecrawl_core::analysis::{analyze_duplicates, generate_analysis_report};
use scopecrawl_core::merge::{DedupeMode, dedupe, load_records};
use scopecrawl_core::output::{write_json_array, write_records};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use url::Url;

// Re-export crawl types and functions from scopecrawl-core
pub use scopecrawl_core::crawl::{
    CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path, generate_crawl_report,
};

// Helper functions for crawl handler

/// Load seed URLs from either a file or the `--url` arguments
pub fn load_urls_from_source(
    urls: &[&Url],
    hosts_file: Option<&PathBuf>,
) -> Result<Vec<String>, String> {
    if let Some(hosts_file_path) = hosts_file {
        load_urls_from_file(hosts_file_path)
    } else if !urls.is_empty() {
        Ok(urls.iter().map(|url| url.as_str().to_string()).collect())
    } else {
        Err("Either --url or --hosts-file must be provided".to_string())
    }
}

/// Load and parse URLs from a file
pub fn load_urls_from_file(path: &PathBuf) -> Result<Vec<String>, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read hosts file {}: {}", path.display(), e))?;

    let urls: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(parse_url_line)
        .collect();

    if urls.is_empty() {
        return Err(format!("No valid URLs found in {}", path.display()));
    }

    Ok(urls)
}

/// Parse a single line as a URL, trying to add https:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    if let Ok(url) = Url::parse(line)
        && url.has_host()
    {
        return Some(line.to_string());
    }

    let with_scheme = format!("https://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("{} Skipping invalid URL '{}'", "⚠".yellow(), line);
    None
}

/// Build crawl options from the `crawl` subcommand matches
pub fn crawl_options_from_args(sub_matches: &ArgMatches, urls: Vec<String>) -> CrawlOptions {
    let output = sub_matches
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("output.jsonl");
    // 0 disables the page cap
    let max_pages = sub_matches
        .get_one::<usize>("max-pages")
        .copied()
        .filter(|pages| *pages > 0);

    CrawlOptions {
        urls,
        threads: *sub_matches.get_one::<usize>("threads").unwrap_or(&10),
        filter_depth: *sub_matches.get_one::<usize>("filter-depth").unwrap_or(&1),
        max_depth: sub_matches.get_one::<usize>("max-depth").copied(),
        max_pages,
        timeout_secs: *sub_matches.get_one::<u64>("timeout").unwrap_or(&10),
        output: PathBuf::from(shellexpand::tilde(output).into_owned()),
        show_progress_bars: !sub_matches.get_flag("quiet"),
    }
}

/// `<stem>_deduped.<ext>` next to the input file
pub fn default_dedupe_output(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string());
    let name = match input.extension() {
        Some(ext) => format!("{}_deduped.{}", stem, ext.to_string_lossy()),
        None => format!("{}_deduped", stem),
    };
    input.with_file_name(name)
}

fn is_json_lines(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jsonl")
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

pub fn print_banner() {
    print_divider();
    println!(
        "{} {}",
        "  SCOPECRAWL".bright_white().bold(),
        env!("CARGO_PKG_VERSION").bright_black()
    );
    print_divider();
}

pub async fn handle_crawl(sub_matches: &ArgMatches) {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    let quiet = sub_matches.get_flag("quiet");
    let url_args: Vec<&Url> = sub_matches
        .get_many::<Url>("url")
        .map(|values| values.collect())
        .unwrap_or_default();
    let hosts_file = sub_matches.get_one::<PathBuf>("hosts-file");

    let urls = match load_urls_from_source(&url_args, hosts_file) {
        Ok(urls) => urls,
        Err(e) => {
            eprintln!("{} {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    let options = crawl_options_from_args(sub_matches, urls);

    if !quiet {
        println!(
            "\n{} Crawling {} seed URL(s)",
            "→".blue(),
            options.urls.len().to_string().bright_white()
        );
        println!("Workers: {}", options.threads);
        println!("Filter depth: {}", options.filter_depth);
        println!(
            "Max depth: {}",
            options
                .max_depth
                .map(|d| d.to_string())
                .unwrap_or_else(|| "unlimited".to_string())
        );
        println!(
            "Max pages: {}",
            options
                .max_pages
                .map(|p| p.to_string())
                .unwrap_or_else(|| "unlimited".to_string())
        );
        println!("Output: {}\n", options.output.display());
    }

    let progress_callback: Option<CrawlProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            println!("{}", msg);
        }))
    };

    let report = match execute_crawl(options, progress_callback).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} Crawl failed: {}", "✗".red().bold(), e);
            std::process::exit(1);
        }
    };

    if !quiet {
        println!("\n{} Crawl complete!\n", "✓".green().bold());
        print!("{}", generate_crawl_report(&report));
    }
    println!(
        "{} Wrote {} records to {}",
        "✓".green().bold(),
        report.records.len().to_string().cyan(),
        report.output.display().to_string().bright_white()
    );
}

pub fn handle_dedupe(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let quiet = sub_matches.get_flag("quiet");
    let input = sub_matches
        .get_one::<PathBuf>("INPUT")
        .context("No input file given")?;
    let mode_name = sub_matches
        .get_one::<String>("mode")
        .map(String::as_str)
        .unwrap_or("content");
    let Some(mode) = DedupeMode::from_str(mode_name) else {
        bail!("Unknown dedupe mode '{}'", mode_name);
    };
    let seed_url = sub_matches.get_one::<String>("seed-url").map(String::as_str);
    let filter_depth = *sub_matches.get_one::<usize>("filter-depth").unwrap_or(&1);
    let output = sub_matches
        .get_one::<String>("output")
        .map(|path| PathBuf::from(shellexpand::tilde(path).into_owned()))
        .unwrap_or_else(|| default_dedupe_output(input));

    let records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;
    if !quiet {
        println!(
            "{} Loaded {} records from {}",
            "→".blue(),
            records.len().to_string().cyan(),
            input.display().to_string().bright_white()
        );
    }

    let (kept, report) = dedupe(records, mode, seed_url, filter_depth)
        .with_context(|| format!("Failed to dedupe in {} mode", mode.as_str()))?;

    let written = if is_json_lines(&output) {
        write_records(&output, &kept)
    } else {
        write_json_array(&output, &kept)
    };
    written.with_context(|| format!("Failed to write {}", output.display()))?;

    if !quiet {
        print_divider();
        println!("{}", "  DEDUPLICATION SUMMARY".bright_white().bold());
        print_divider();
        println!("  Mode: {}", mode.as_str());
        println!("  Original records: {}", report.original);
        if mode == DedupeMode::Scoped {
            println!("  Filtered out of scope: {}", report.filtered);
        }
        println!("  URL duplicates removed: {}", report.url_duplicates);
        if mode == DedupeMode::Content {
            println!("  Content duplicates removed: {}", report.content_duplicates);
        }
        println!("  Final records: {}", report.kept);
        println!(
            "  Reduction: {} records ({:.1}%)",
            report.removed(),
            report.reduction_percent()
        );
    }
    println!(
        "{} Wrote {} records to {}",
        "✓".green().bold(),
        kept.len().to_string().cyan(),
        output.display().to_string().bright_white()
    );
    Ok(())
}

pub fn handle_analyze(sub_matches: &ArgMatches) -> anyhow::Result<()> {
    let input = sub_matches
        .get_one::<PathBuf>("INPUT")
        .context("No input file given")?;

    let records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;
    let analysis = analyze_duplicates(&records);
    print!("{}", generate_analysis_report(&analysis));
    Ok(())
}
