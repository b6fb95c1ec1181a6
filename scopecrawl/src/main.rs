use scopecrawl::commands::command_argument_builder;
use scopecrawl::handlers::{handle_analyze, handle_crawl, handle_dedupe, print_banner};

#[tokio::main]
async fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    let outcome = match chosen_command.subcommand() {
        Some(("crawl", primary_command)) => {
            handle_crawl(primary_command).await;
            Ok(())
        }
        Some(("dedupe", primary_command)) => handle_dedupe(primary_command),
        Some(("analyze", primary_command)) => handle_analyze(primary_command),
        // No subcommand provided, just show the banner
        None => Ok(()),
        _ => unreachable!("clap should ensure we don't get here"),
    };

    if let Err(e) = outcome {
        eprintln!("✗ {:#}", e);
        std::process::exit(1);
    }
}
