use scopecrawl::commands::command_argument_builder;
use scopecrawl::handlers::*;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::{NamedTempFile, TempDir};
use url::Url;

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com/d4/");
    assert_eq!(result, Some("https://example.com/d4/".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com/d4");
    assert_eq!(result, Some("https://example.com/d4".to_string()));
}

#[test]
fn test_parse_url_line_host_with_port() {
    let result = parse_url_line("localhost:8080/docs");
    assert_eq!(result, Some("https://localhost:8080/docs".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    let result = parse_url_line("not a valid url!!!");
    assert_eq!(result, None);
}

#[test]
fn test_extract_url_path() {
    assert_eq!(
        extract_url_path("https://example.com/d4/guides"),
        "/d4/guides"
    );
    assert_eq!(extract_url_path("https://example.com/"), "/");
    assert_eq!(extract_url_path("https://example.com"), "/");
}

#[test]
fn test_load_urls_from_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut temp_file = NamedTempFile::new()?;
    writeln!(temp_file, "https://example.com/d4/")?;
    writeln!(temp_file, "# comment line")?;
    writeln!(temp_file, "example.org/docs")?;
    writeln!(temp_file)?; // Empty line
    writeln!(temp_file, "  https://example.com/d4/guides  ")?;

    let path = PathBuf::from(temp_file.path());
    let urls = load_urls_from_file(&path)?;

    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], "https://example.com/d4/");
    assert_eq!(urls[1], "https://example.org/docs");
    assert_eq!(urls[2], "https://example.com/d4/guides");

    Ok(())
}

#[test]
fn test_load_urls_from_file_empty() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(temp_file).unwrap();
    writeln!(temp_file, "   ").unwrap();

    let path = PathBuf::from(temp_file.path());
    let result = load_urls_from_file(&path);

    assert!(result.is_err());
    assert!(result.unwrap_err().contains("No valid URLs"));
}

#[test]
fn test_load_urls_from_source_keeps_seed_order() {
    let first = Url::parse("https://example.com/d4").unwrap();
    let second = Url::parse("https://example.com/d4/guides").unwrap();
    let result = load_urls_from_source(&[&first, &second], None).unwrap();

    assert_eq!(
        result,
        vec![
            "https://example.com/d4".to_string(),
            "https://example.com/d4/guides".to_string()
        ]
    );
}

#[test]
fn test_load_urls_from_source_no_input() {
    let result = load_urls_from_source(&[], None);
    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .contains("Either --url or --hosts-file must be provided")
    );
}

#[test]
fn test_crawl_defaults() {
    let matches = command_argument_builder()
        .try_get_matches_from(["scopecrawl", "crawl", "-u", "https://example.com/d4/"])
        .unwrap();
    let (_, crawl) = matches.subcommand().unwrap();
    let options = crawl_options_from_args(crawl, vec!["https://example.com/d4/".to_string()]);

    assert_eq!(options.threads, 10);
    assert_eq!(options.filter_depth, 1);
    assert_eq!(options.max_depth, None);
    assert_eq!(options.max_pages, Some(10_000));
    assert_eq!(options.timeout_secs, 10);
    assert_eq!(options.output, PathBuf::from("output.jsonl"));
    assert!(options.show_progress_bars);
}

#[test]
fn test_crawl_flags() {
    let matches = command_argument_builder()
        .try_get_matches_from([
            "scopecrawl",
            "crawl",
            "-u",
            "https://example.com/d4/",
            "-u",
            "https://example.com/d4/guides",
            "--filter-depth",
            "2",
            "--max-depth",
            "3",
            "--max-pages",
            "0",
            "-t",
            "4",
            "-o",
            "out.jsonl",
            "-q",
        ])
        .unwrap();
    let (_, crawl) = matches.subcommand().unwrap();
    assert_eq!(crawl.get_many::<Url>("url").unwrap().count(), 2);

    let options = crawl_options_from_args(crawl, Vec::new());
    assert_eq!(options.filter_depth, 2);
    assert_eq!(options.max_depth, Some(3));
    assert_eq!(options.max_pages, None);
    assert_eq!(options.threads, 4);
    assert_eq!(options.output, PathBuf::from("out.jsonl"));
    assert!(!options.show_progress_bars);
}

#[test]
fn test_url_and_hosts_file_conflict() {
    let result = command_argument_builder().try_get_matches_from([
        "scopecrawl",
        "crawl",
        "-u",
        "https://example.com/",
        "-H",
        "hosts.txt",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_dedupe_rejects_unknown_mode() {
    let result = command_argument_builder().try_get_matches_from([
        "scopecrawl",
        "dedupe",
        "in.jsonl",
        "--mode",
        "fuzzy",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_default_dedupe_output() {
    assert_eq!(
        default_dedupe_output(Path::new("/tmp/crawl/output.jsonl")),
        PathBuf::from("/tmp/crawl/output_deduped.jsonl")
    );
    assert_eq!(
        default_dedupe_output(Path::new("records")),
        PathBuf::from("records_deduped")
    );
}

#[test]
fn test_handle_dedupe_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("in.jsonl");
    std::fs::write(
        &input,
        "{\"url\":\"https://x.com/d4/b\"}\n{\"url\":\"https://x.com/d2/a\"}\n{\"url\":\"https://x.com/d4/b#x\"}\n",
    )?;
    let output = dir.path().join("out.jsonl");

    let matches = command_argument_builder().try_get_matches_from([
        "scopecrawl",
        "dedupe",
        input.to_str().unwrap(),
        "--mode",
        "scoped",
        "--seed-url",
        "https://x.com/d4/",
        "-o",
        output.to_str().unwrap(),
        "-q",
    ])?;
    let (_, dedupe) = matches.subcommand().unwrap();
    handle_dedupe(dedupe)?;

    let text = std::fs::read_to_string(&output)?;
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(serde_json::from_str)
        .collect::<Result<_, _>>()?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["url"], "https://x.com/d4/b");
    Ok(())
}

#[test]
fn test_handle_dedupe_scoped_without_seed_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let input = dir.path().join("in.jsonl");
    std::fs::write(&input, "{\"url\":\"https://x.com/d4/b\"}\n")?;

    let matches = command_argument_builder().try_get_matches_from([
        "scopecrawl",
        "dedupe",
        input.to_str().unwrap(),
        "--mode",
        "scoped",
        "-q",
    ])?;
    let (_, dedupe) = matches.subcommand().unwrap();
    assert!(handle_dedupe(dedupe).is_err());
    Ok(())
}

#[test]
fn test_handle_analyze_missing_file() {
    let matches = command_argument_builder()
        .try_get_matches_from(["scopecrawl", "analyze", "/nonexistent/records.jsonl"])
        .unwrap();
    let (_, analyze) = matches.subcommand().unwrap();
    let err = handle_analyze(analyze).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to load records"));
}
