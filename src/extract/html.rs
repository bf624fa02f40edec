// src/extract/html.rs
// =============================================================================
// This module extracts links from HTML pages.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever, so broken markup still parses (best effort)
//
// We also use the `url` crate to:
// - Parse and validate URLs
// - Resolve relative URLs against the page they were found on
//
// Rust concepts:
// - HashSet: duplicates on one page collapse to a single link
// - Option: for hrefs that don't resolve to anything usable
// =============================================================================

use super::LinkExtractor;
use scraper::{Html, Selector};
use std::collections::HashSet;
use tracing::warn;
use url::Url;

pub struct HtmlLinkExtractor {
    anchors: Selector,
}

impl HtmlLinkExtractor {
    pub fn new() -> Self {
        // "a[href]" is a constant and known to be valid
        let anchors = Selector::parse("a[href]").expect("static anchor selector is valid");
        Self { anchors }
    }
}

impl Default for HtmlLinkExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl LinkExtractor for HtmlLinkExtractor {
    // Extracts all absolute http(s) links from HTML content
    //
    // Example:
    //   html = "<a href='/docs/a.html'>Docs</a>"
    //   base_url = "https://example.com"
    //   result = {"https://example.com/docs/a.html"}
    fn extract_links(&self, html: &str, base_url: &str) -> HashSet<String> {
        let mut links = HashSet::new();

        // Parse the base URL once
        // We'll use this to resolve relative links
        let base = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                // If base URL is invalid, we can't resolve relative links
                warn!(base_url, error = %e, "invalid base URL, skipping link extraction");
                return links;
            }
        };

        let document = Html::parse_document(html);

        for element in document.select(&self.anchors) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_url(&base, href) {
                    if is_crawlable_link(&absolute_url) {
                        links.insert(absolute_url);
                    }
                }
            }
        }

        links
    }
}

// Resolves a possibly-relative href to an absolute URL
//
// Examples:
//   base = "https://example.com/page/"
//   href = "a.html"          -> Some("https://example.com/page/a.html")
//   href = "../other.html"   -> Some("https://example.com/other.html")
//   href = "#top"            -> None (same page)
//   href = "mailto:x@y.com"  -> None
fn resolve_url(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("javascript:")
        || href.starts_with("data:")
    {
        return None;
    }

    // join() handles both cases: an absolute href replaces the base entirely,
    // a relative one is resolved the way a browser would
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url.to_string())
}

fn is_crawlable_link(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
