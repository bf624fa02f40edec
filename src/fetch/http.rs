// src/fetch/http.rs
// =============================================================================
// The real Fetcher: downloads pages over HTTP with reqwest.
//
// Key functionality:
// - One shared Client for the whole crawl (connection pooling for free)
// - Total per-request timeout taken from CrawlConfig
// - Any non-2xx status is treated as a failed download
// - reqwest errors are categorized into short, readable reasons
//
// Rust concepts:
// - async/await: For concurrent network I/O
// - Result<T, E>: For error handling
// - Traits: HttpFetcher is one implementation of the Fetcher trait
// =============================================================================

use super::Fetcher;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    // Builds the HTTP client from the crawl config
    //
    // Returns: Err(ClientBuild) if reqwest can't set up TLS or the builder
    // rejects a setting. This is the only place the fetcher fails for a
    // reason other than a single bad page.
    pub fn new(config: &CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(5))  // Follow up to 5 redirects
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(CrawlError::ClientBuild)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetch");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| categorize_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::transport(url, format!("HTTP {}", status.as_u16())));
        }

        // The body can still fail mid-stream (reset, timeout, bad encoding)
        response.text().await.map_err(|e| categorize_error(url, e))
    }
}

// Categorizes different error types from reqwest
//
// The crawl treats every one of these the same way (drop the page), but the
// reason ends up in the warn! log so it should be readable.
fn categorize_error(url: &str, error: reqwest::Error) -> CrawlError {
    // Convert error to string once to avoid lifetime issues
    let error_string = error.to_string();

    let reason = if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_redirect() {
        "Too many redirects".to_string()
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if error_string.contains("dns") {
            "Could not resolve hostname".to_string()
        } else {
            "Connection failed".to_string()
        }
    } else if error_string.contains("certificate") || error_string.contains("ssl") {
        "SSL certificate error".to_string()
    } else if error.is_decode() || error.is_body() {
        format!("Could not read response body: {}", error_string)
    } else {
        error_string
    };

    CrawlError::transport(url, reason)
}
