// src/extract/mod.rs
// =============================================================================
// This module turns a fetched page into the set of pages it links to.
//
// Submodules:
// - html: HtmlLinkExtractor, built on scraper + url
//
// Extraction is a pure function of (body, base_url), so the trait is
// synchronous. Malformed markup never fails, it just yields fewer links.
// =============================================================================

mod html;

use std::collections::HashSet;

pub use html::HtmlLinkExtractor;

pub trait LinkExtractor: Send + Sync {
    fn extract_links(&self, body: &str, base_url: &str) -> HashSet<String>;
}
