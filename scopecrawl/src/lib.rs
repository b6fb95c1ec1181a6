// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

#[path = "commands.rs"]
pub mod commands;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    crawl_options_from_args, default_dedupe_output, load_urls_from_file, load_urls_from_source,
    parse_url_line,
};

// Re-export crawl functionality from scopecrawl-core
pub use scopecrawl_core::crawl::{
    CrawlOptions, CrawlProgressCallback, execute_crawl, extract_url_path, generate_crawl_report,
};
