// src/error.rs
// =============================================================================
// Error types for the crawl engine.
//
// Only misuse is a crawl-level failure (bad config, an HTTP client we can't
// build). A single page that fails to download is a Transport error, which
// the workers log and drop instead of returning to the caller.
// =============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Concurrency must be greater than 0, got {0}")]
    InvalidConcurrency(usize),

    #[error("Invalid crawl configuration: {0}")]
    InvalidConfig(String),

    #[error("Could not build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Failed to fetch {url}: {reason}")]
    Transport { url: String, reason: String },
}

impl CrawlError {
    pub fn transport(url: impl Into<String>, reason: impl Into<String>) -> Self {
        CrawlError::Transport {
            url: url.into(),
            reason: reason.into(),
        }
    }

    // True for errors that only affect a single page
    pub fn is_transport(&self) -> bool {
        matches!(self, CrawlError::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
