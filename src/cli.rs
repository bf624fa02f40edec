// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// The CLI is deliberately thin: it collects the crawl settings, hands them
// to the library as a CrawlConfig, and prints whatever comes back.
// =============================================================================

use clap::Parser;
use link_spider::config::{
    CrawlConfig, DEFAULT_CONCURRENCY, DEFAULT_FOLLOW_SUFFIX, DEFAULT_MAX_DEPTH,
    DEFAULT_TIMEOUT_SECS,
};
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(
    name = "link-spider",
    version,
    about = "Crawl websites concurrently and print which pages link to which",
    long_about = "link-spider starts from one or more root sites, follows .html links up to a \
                  maximum depth with a pool of concurrent workers, and prints every fetched page \
                  followed by the pages it links to."
)]
pub struct Cli {
    /// Root websites to visit (a missing scheme defaults to http://)
    ///
    /// Example: link-spider example.com https://docs.rs/index.html
    pub sites: Vec<String>,

    /// Number of concurrent I/O requests
    #[arg(long, value_name = "N", default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Maximum depth of recursion (seeds are depth 0)
    #[arg(long, value_name = "DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    pub depth: usize,

    /// Only links ending with this suffix are recorded and followed
    #[arg(long, value_name = "SUFFIX", default_value = DEFAULT_FOLLOW_SUFFIX)]
    pub suffix: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// User-Agent header sent with every request
    #[arg(long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Output results in JSON format instead of an indented list
    #[arg(long)]
    pub json: bool,

    /// Run verbosely (info-level logs on stderr)
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    pub fn crawl_config(&self) -> CrawlConfig {
        let config = CrawlConfig::new(self.concurrency, self.depth)
            .with_follow_suffix(self.suffix.clone())
            .with_timeout(Duration::from_secs(self.timeout));

        match &self.user_agent {
            Some(agent) => config.with_user_agent(agent.clone()),
            None => config,
        }
    }
}
