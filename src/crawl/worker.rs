// src/crawl/worker.rs
// =============================================================================
// One crawl worker: the loop every task in the pool runs.
//
// Each iteration moves through these states:
//
//   Idle -> Fetching -> Extracting -> Filtering -> Idle
//
// and any state can end in Cancelled once the coordinator shuts the queue.
//
// The current item is always acknowledged with mark_done(), on every path
// (skipped, fetch failed, panicked, processed), and always after its children were
// put on the queue.
// =============================================================================

use super::graph::ResultGraph;
use super::normalize::normalize;
use super::queue::{FrontierQueue, WorkItem};
use super::registry::VisitedRegistry;
use super::stats::CrawlStats;
use crate::extract::LinkExtractor;
use crate::fetch::Fetcher;
use futures::FutureExt;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{debug, trace, warn};

// Everything the workers share for the lifetime of one crawl
pub(crate) struct CrawlContext {
    pub queue: FrontierQueue,
    pub visited: VisitedRegistry,
    pub graph: ResultGraph,
    pub stats: CrawlStats,
    pub fetcher: Arc<dyn Fetcher>,
    pub extractor: Arc<dyn LinkExtractor>,
    pub max_depth: usize,
    pub follow_suffix: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Idle,
    Fetching,
    Extracting,
    Filtering,
    Cancelled,
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkerState::Idle => "idle",
            WorkerState::Fetching => "fetching",
            WorkerState::Extracting => "extracting",
            WorkerState::Filtering => "filtering",
            WorkerState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

// Runs until the queue is cancelled
//
// Parameters:
//   id: worker number, only used in logs
//   ctx: the shared crawl state
pub(crate) async fn run(id: usize, ctx: Arc<CrawlContext>) {
    loop {
        trace!(worker = id, state = %WorkerState::Idle);

        let item = match ctx.queue.get().await {
            Ok(item) => item,
            Err(e) => {
                debug!(worker = id, state = %WorkerState::Cancelled, reason = %e, "worker stopping");
                return;
            }
        };

        // A panicking fetcher or extractor costs one page, not the worker.
        // If workers died instead, buffered items would have no consumer
        // and join() would never see zero.
        if AssertUnwindSafe(process(id, &ctx, &item)).catch_unwind().await.is_err() {
            warn!(worker = id, url = %item.url, "panic while processing page, dropping it");
            ctx.stats.fetch_failed();
        }

        if let Err(e) = ctx.queue.mark_done() {
            warn!(worker = id, error = %e, "frontier acknowledgment out of balance");
        }
    }
}

async fn process(id: usize, ctx: &CrawlContext, item: &WorkItem) {
    let url = item.url.as_str();

    // Defensive filters against malformed or duplicate input, not errors
    if url.is_empty() || !url.starts_with("http") || ctx.graph.contains_parent(url) {
        debug!(worker = id, url, "skipping item");
        ctx.stats.item_skipped();
        return;
    }

    debug!(worker = id, state = %WorkerState::Fetching, depth = item.depth, url);
    let body = match ctx.fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => {
            warn!(worker = id, url, error = %e, "fetch failed");
            ctx.stats.fetch_failed();
            return;
        }
    };
    ctx.stats.page_fetched();

    trace!(worker = id, state = %WorkerState::Extracting, url);
    let links = ctx.extractor.extract_links(&body, url);

    trace!(worker = id, state = %WorkerState::Filtering, url, links = links.len());
    for raw in links {
        let child = normalize(&raw);
        if !child.ends_with(&ctx.follow_suffix) {
            debug!(worker = id, link = %child, "ignore non-{}", ctx.follow_suffix);
            ctx.stats.link_ignored();
            continue;
        }

        // Recorded even past max_depth: the graph lists every known link,
        // only fetching is depth-bounded
        ctx.graph.record(url, &child);

        if item.depth < ctx.max_depth && ctx.visited.try_claim(&child) {
            ctx.queue.put(WorkItem::new(item.depth + 1, child));
            ctx.stats.item_enqueued();
        }
    }
}
