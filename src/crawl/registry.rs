// src/crawl/registry.rs
// =============================================================================
// Tracks every URL that has ever been queued during one crawl.
//
// try_claim() is the single check-and-insert that decides who gets to
// enqueue a URL. Two workers racing on the same link both call it; exactly
// one sees `true` and enqueues, the other drops its copy.
// =============================================================================

use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    seen: Mutex<HashSet<String>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    // Returns true iff this call inserted the URL (first discovery)
    pub fn try_claim(&self, url: &str) -> bool {
        let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if seen.contains(url) {
            return false;
        }
        seen.insert(url.to_string())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .contains(url)
    }

    pub fn claimed_count(&self) -> usize {
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner()).len()
    }
}
