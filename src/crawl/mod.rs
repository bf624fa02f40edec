// src/crawl/mod.rs
// =============================================================================
// This module is the crawl engine.
//
// Features:
// - A fixed pool of concurrent workers sharing one frontier queue
// - At-most-once fetching of every normalized URL
// - A configurable depth limit
// - Clean shutdown once the reachable frontier is exhausted
//
// Submodules:
// - normalize: canonical URL form used for dedup
// - queue: FrontierQueue, the work queue with join() completion detection
// - registry: VisitedRegistry, the "who enqueues this URL" claim set
// - graph: ResultGraph, the parent -> children output
// - stats: per-crawl counters
// - worker: the per-task crawl loop
// - coordinator: Crawler, which wires everything together
// =============================================================================

mod coordinator;
mod graph;
mod normalize;
mod queue;
mod registry;
mod stats;
mod worker;

pub use coordinator::{crawl, CrawlReport, Crawler};
pub use graph::{LinkGraph, ResultGraph};
pub use normalize::normalize;
pub use queue::{FrontierQueue, QueueError, WorkItem};
pub use registry::VisitedRegistry;
pub use stats::{CrawlStats, CrawlSummary};
