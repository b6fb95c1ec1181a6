use clap::{arg, command};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("scopecrawl")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("scopecrawl")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Suppress banner and non-essential output")
                .required(false)
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl a site, staying inside the path section of the seed URL. Writes one \
                JSON record per page.",
                )
                .arg(
                    arg!(-u --"url" <URL>)
                        .required(false)
                        .help("Seed URL to crawl (repeatable). The first seed sets host and scope")
                        .value_parser(clap::value_parser!(Url))
                        .action(clap::ArgAction::Append)
                        .conflicts_with("hosts-file"),
                )
                .arg(
                    arg!(-H --"hosts-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of seed URLs")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("url"),
                )
                .arg(
                    arg!(--"filter-depth" <SEGMENTS>)
                        .required(false)
                        .help("Leading seed path segments a link must share to be followed (0 = whole host)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                )
                .arg(
                    arg!(--"max-depth" <DEPTH>)
                        .required(false)
                        .help("Maximum link distance from a seed (default: unlimited)")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(--"max-pages" <PAGES>)
                        .required(false)
                        .help("Maximum number of pages to process (0 = unlimited)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10000"),
                )
                .arg(
                    arg!(-t --"threads" <NUM_WORKERS>)
                        .required(false)
                        .help("The number of async worker 'threads' in the worker pool.")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("JSON lines output file")
                        .default_value("output.jsonl"),
                ),
        )
        .subcommand(
            command!("dedupe")
                .about("Deduplicate a previously written record file")
                .arg(
                    arg!(<INPUT>)
                        .help("JSON lines or JSON array file of records")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                )
                .arg(
                    arg!(-m --"mode" <MODE>)
                        .required(false)
                        .help("url: first record per URL, content: richest record per URL plus content dedup, scoped: scope filter plus URL dedup")
                        .value_parser(["url", "content", "scoped"])
                        .default_value("content"),
                )
                .arg(
                    arg!(--"seed-url" <URL>)
                        .required(false)
                        .help("Seed URL defining the scope (required for scoped mode)"),
                )
                .arg(
                    arg!(--"filter-depth" <SEGMENTS>)
                        .required(false)
                        .help("Leading seed path segments a record must share (scoped mode)")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("1"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Output file; .jsonl writes JSON lines, anything else a JSON array (default: <INPUT>_deduped)"),
                ),
        )
        .subcommand(
            command!("analyze")
                .about("Report duplicate patterns in a record file")
                .arg(
                    arg!(<INPUT>)
                        .help("JSON lines or JSON array file of records")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
}
