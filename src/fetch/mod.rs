// src/fetch/mod.rs
// =============================================================================
// This module defines how the crawler downloads pages.
//
// The crawl engine only needs one thing from the network: "give me the body
// of this URL, or tell me it failed". That contract is the Fetcher trait.
//
// Submodules:
// - http: HttpFetcher, the reqwest-backed implementation used by the CLI
//
// Tests swap in their own in-memory Fetcher so the worker logic can be
// exercised without any network.
// =============================================================================

mod http;

use crate::error::Result;
use async_trait::async_trait;

pub use http::HttpFetcher;

// Retrieves a document body given its URL
//
// Implementations should return CrawlError::Transport for anything that
// means "this page yields no content" (connection refused, timeout, DNS
// failure, non-2xx status). The crawler logs it and moves on.
//
// Send + Sync because one fetcher is shared by every worker task.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}
