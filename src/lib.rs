// src/lib.rs
// =============================================================================
// link-spider: a concurrent, depth-bounded web crawler.
//
// Give it some seed URLs, a worker count and a depth limit; it returns a map
// from every fetched page to the .html pages it links to.
//
// Modules:
// - config: CrawlConfig, every knob the engine reads
// - error: CrawlError and the crate-wide Result alias
// - fetch: the Fetcher trait and the reqwest-backed HttpFetcher
// - extract: the LinkExtractor trait and the scraper-backed HtmlLinkExtractor
// - crawl: the engine itself (queue, registry, graph, workers, coordinator)
// =============================================================================

pub mod config;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod fetch;

pub use config::CrawlConfig;
pub use crawl::{crawl, normalize, CrawlReport, CrawlSummary, Crawler, LinkGraph};
pub use error::{CrawlError, Result};
pub use extract::{HtmlLinkExtractor, LinkExtractor};
pub use fetch::{Fetcher, HttpFetcher};
