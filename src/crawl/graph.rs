// src/crawl/graph.rs
// =============================================================================
// The crawl's output: which page links to which.
//
// A parent appears only once one of its qualifying children is recorded, so
// a page that was fetched but linked nowhere useful has no entry at all.
// Children are only ever added, never removed.
//
// Sorted collections (BTreeMap / BTreeSet) make the final snapshot print in
// a stable order without the caller having to sort.
// =============================================================================

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

pub type LinkGraph = BTreeMap<String, BTreeSet<String>>;

#[derive(Debug, Default)]
pub struct ResultGraph {
    links: Mutex<LinkGraph>,
}

impl ResultGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds `child` under `parent`, creating the parent entry on first use
    //
    // Returns: true if the edge is new
    pub fn record(&self, parent: &str, child: &str) -> bool {
        let mut links = self.lock();
        links
            .entry(parent.to_string())
            .or_default()
            .insert(child.to_string())
    }

    pub fn contains_parent(&self, url: &str) -> bool {
        self.lock().contains_key(url)
    }

    pub fn children_of(&self, parent: &str) -> Option<BTreeSet<String>> {
        self.lock().get(parent).cloned()
    }

    pub fn parent_count(&self) -> usize {
        self.lock().len()
    }

    // Copies the whole graph out in one locked read
    pub fn snapshot(&self) -> LinkGraph {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LinkGraph> {
        self.links.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
