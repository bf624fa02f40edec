// src/crawl/stats.rs
// =============================================================================
// Counters the workers bump while crawling, and the serializable summary the
// caller gets back at the end.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct CrawlStats {
    pages_fetched: AtomicUsize,
    fetch_failures: AtomicUsize,
    items_skipped: AtomicUsize,
    links_ignored: AtomicUsize,
    items_enqueued: AtomicUsize,
}

impl CrawlStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_fetched(&self) {
        self.pages_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn fetch_failed(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    // Dequeued item rejected before fetching (empty, duplicate or not http)
    pub fn item_skipped(&self) {
        self.items_skipped.fetch_add(1, Ordering::Relaxed);
    }

    // Child link dropped by the suffix filter
    pub fn link_ignored(&self) {
        self.links_ignored.fetch_add(1, Ordering::Relaxed);
    }

    pub fn item_enqueued(&self) {
        self.items_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub fn summary(&self) -> CrawlSummary {
        CrawlSummary {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            items_skipped: self.items_skipped.load(Ordering::Relaxed),
            links_ignored: self.links_ignored.load(Ordering::Relaxed),
            items_enqueued: self.items_enqueued.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSummary {
    pub pages_fetched: usize,
    pub fetch_failures: usize,
    pub items_skipped: usize,
    pub links_ignored: usize,
    /// Seeds plus every child put on the frontier
    pub items_enqueued: usize,
}
