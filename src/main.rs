// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing) on stderr
// 3. Run the crawl
// 4. Print each fetched page followed by its links, sorted
// 5. Exit with proper code (0 = success, 2 = error)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use link_spider::{CrawlReport, Crawler};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match run(cli).await {
        Ok(()) => 0,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG wins when set; otherwise --verbose picks info over warn
fn init_logging(verbose: bool) {
    let default = if verbose { "link_spider=info" } else { "link_spider=warn" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let crawler = Crawler::new(cli.crawl_config()).context("invalid crawl settings")?;
    let report = crawler.run(&cli.sites).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

// Prints every parent page, then its children indented underneath
//
// The graph is a BTreeMap of BTreeSets, so both levels already come out
// sorted.
fn print_report(report: &CrawlReport) {
    for (site, links) in &report.graph {
        println!("{}", site);
        for link in links {
            println!("    {}", link);
        }
    }
}
