// src/crawl/coordinator.rs
// =============================================================================
// Runs a whole crawl: seed the frontier, start the worker pool, wait for the
// frontier to drain, shut the pool down, hand back the link graph.
//
// How it works:
// 1. Validate the config (fails before anything is spawned)
// 2. Normalize + claim each seed, put it on the queue at depth 0
// 3. Spawn `concurrency` worker tasks
// 4. join() the queue: returns once every reachable page within
//    max_depth has been processed
// 5. cancel() the queue, which releases every worker parked in get()
// 6. Wait for every worker task to finish, then snapshot the graph
// =============================================================================

use super::graph::LinkGraph;
use super::normalize::normalize;
use super::queue::WorkItem;
use super::stats::CrawlSummary;
use super::worker::{self, CrawlContext};
use super::{CrawlStats, FrontierQueue, ResultGraph, VisitedRegistry};
use crate::config::CrawlConfig;
use crate::error::Result;
use crate::extract::{HtmlLinkExtractor, LinkExtractor};
use crate::fetch::{Fetcher, HttpFetcher};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

// What a finished crawl returns
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlReport {
    pub graph: LinkGraph,
    pub stats: CrawlSummary,
}

pub struct Crawler {
    config: CrawlConfig,
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn LinkExtractor>,
}

impl Crawler {
    // Builds a crawler backed by reqwest + scraper
    pub fn new(config: CrawlConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config)?;
        Ok(Self {
            config,
            fetcher: Arc::new(fetcher),
            extractor: Arc::new(HtmlLinkExtractor::new()),
        })
    }

    // Builds a crawler around custom collaborators (tests, other transports)
    pub fn with_parts(
        config: CrawlConfig,
        fetcher: Arc<dyn Fetcher>,
        extractor: Arc<dyn LinkExtractor>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            fetcher,
            extractor,
        })
    }

    // Crawls from the given seeds until the frontier is exhausted
    //
    // Parameters:
    //   seeds: starting URLs, normalized and deduplicated before queueing
    //
    // Returns: the link graph plus counters. Individual page failures never
    // make this return Err; only an invalid config does.
    pub async fn run<I, S>(&self, seeds: I) -> Result<CrawlReport>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.config.validate()?;
        let started = Instant::now();

        let ctx = Arc::new(CrawlContext {
            queue: FrontierQueue::new(),
            visited: VisitedRegistry::new(),
            graph: ResultGraph::new(),
            stats: CrawlStats::new(),
            fetcher: self.fetcher.clone(),
            extractor: self.extractor.clone(),
            max_depth: self.config.max_depth,
            follow_suffix: self.config.follow_suffix.clone(),
        });

        // Seeds go through the same claim as discovered links, so duplicate
        // seeds and cycles back to a seed are fetched only once
        for seed in seeds {
            let url = normalize(seed.as_ref());
            if ctx.visited.try_claim(&url) {
                ctx.queue.put(WorkItem::new(0, url));
                ctx.stats.item_enqueued();
            } else {
                debug!(seed = %url, "duplicate seed ignored");
            }
        }

        info!(
            seeds = ctx.queue.len(),
            concurrency = self.config.concurrency,
            max_depth = self.config.max_depth,
            "starting crawl"
        );

        let workers: Vec<_> = (0..self.config.concurrency)
            .map(|id| tokio::spawn(worker::run(id, ctx.clone())))
            .collect();

        ctx.queue.join().await;
        debug!("frontier exhausted, cancelling workers");
        ctx.queue.cancel();

        for (id, result) in join_all(workers).await.into_iter().enumerate() {
            if let Err(e) = result {
                warn!(worker = id, error = %e, "worker task ended abnormally");
            }
        }

        let stats = ctx.stats.summary();
        let graph = ctx.graph.snapshot();

        info!(
            pages = stats.pages_fetched,
            failures = stats.fetch_failures,
            parents = graph.len(),
            discovered = ctx.visited.claimed_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "crawl finished"
        );

        Ok(CrawlReport { graph, stats })
    }
}

// Crawls `seed_urls` with the default HTTP fetcher and HTML extractor
//
// Example:
//   let graph = crawl(&["example.com"], 10, 2).await?;
//   for (page, links) in &graph { ... }
pub async fn crawl<S: AsRef<str>>(
    seed_urls: &[S],
    concurrency: usize,
    max_depth: usize,
) -> Result<LinkGraph> {
    let crawler = Crawler::new(CrawlConfig::new(concurrency, max_depth))?;
    let report = crawler.run(seed_urls).await?;
    Ok(report.graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CrawlError;
    use async_trait::async_trait;
    use std::collections::{BTreeSet, HashMap};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::time::timeout;

    // In-memory site: URL -> HTML. Anything else is a 404.
    // Counts how often each URL is requested.
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        hits: Mutex<HashMap<String, usize>>,
        delay: Option<Duration>,
    }

    impl FakeSite {
        fn page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        fn hits(&self, url: &str) -> usize {
            self.hits.lock().unwrap().get(url).copied().unwrap_or(0)
        }

        fn total_hits(&self) -> usize {
            self.hits.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl Fetcher for FakeSite {
        async fn fetch(&self, url: &str) -> Result<String> {
            *self.hits.lock().unwrap().entry(url.to_string()).or_default() += 1;
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| CrawlError::transport(url, "HTTP 404"))
        }
    }

    fn crawler(site: Arc<FakeSite>, concurrency: usize, max_depth: usize) -> Crawler {
        Crawler::with_parts(
            CrawlConfig::new(concurrency, max_depth),
            site,
            Arc::new(HtmlLinkExtractor::new()),
        )
        .unwrap()
    }

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_leaf_page_has_no_entry() {
        let site = Arc::new(
            FakeSite::default()
                .page("http://example.com", r#"<a href="http://example.com/a.html">A</a>"#)
                .page("http://example.com/a.html", r#"<a href="/logo.png">logo</a>"#),
        );

        let report = crawler(site.clone(), 4, 1).run(["example.com"]).await.unwrap();

        let mut expected = LinkGraph::new();
        expected.insert("http://example.com".to_string(), set(&["http://example.com/a.html"]));
        assert_eq!(report.graph, expected);
        assert_eq!(site.hits("http://example.com/a.html"), 1);
        assert_eq!(report.stats.pages_fetched, 2);
    }

    #[tokio::test]
    async fn test_shared_child_fetched_once() {
        let site = Arc::new(
            FakeSite::default()
                .page("http://a.com/index.html", r#"<a href="http://x.com/c.html">c</a>"#)
                .page("http://b.com/index.html", r#"<a href="http://x.com/c.html">c</a>"#)
                .page("http://x.com/c.html", "<p>leaf</p>")
                .with_delay(Duration::from_millis(5)),
        );

        let report = crawler(site.clone(), 4, 1)
            .run(["http://a.com/index.html", "http://b.com/index.html"])
            .await
            .unwrap();

        assert_eq!(site.hits("http://x.com/c.html"), 1);
        assert!(report.graph["http://a.com/index.html"].contains("http://x.com/c.html"));
        assert!(report.graph["http://b.com/index.html"].contains("http://x.com/c.html"));
    }

    #[tokio::test]
    async fn test_zero_concurrency_fails_before_fetching() {
        let site = Arc::new(FakeSite::default().page("http://a.com", "<p/>"));
        let result = Crawler::with_parts(
            CrawlConfig::new(0, 1),
            site.clone(),
            Arc::new(HtmlLinkExtractor::new()),
        );

        assert!(matches!(result, Err(CrawlError::InvalidConcurrency(0))));
        assert_eq!(site.total_hits(), 0);
    }

    #[tokio::test]
    async fn test_zero_concurrency_rejected_by_crawl() {
        let result = crawl(&["example.com"], 0, 1).await;
        assert!(matches!(result, Err(CrawlError::InvalidConcurrency(0))));
    }

    #[tokio::test]
    async fn test_terminates_when_every_fetch_fails() {
        let site = Arc::new(FakeSite::default());
        let report = timeout(
            Duration::from_secs(2),
            crawler(site.clone(), 3, 5).run(["a.com", "b.com", "c.com"]),
        )
        .await
        .expect("crawl should not hang")
        .unwrap();

        assert!(report.graph.is_empty());
        assert_eq!(report.stats.fetch_failures, 3);
        assert_eq!(site.total_hits(), 3);
    }

    struct PanickingFetcher;

    #[async_trait]
    impl Fetcher for PanickingFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            panic!("fetcher blew up on {}", url);
        }
    }

    #[tokio::test]
    async fn test_panicking_fetcher_does_not_hang_single_worker() {
        let crawler = Crawler::with_parts(
            CrawlConfig::new(1, 1),
            Arc::new(PanickingFetcher),
            Arc::new(HtmlLinkExtractor::new()),
        )
        .unwrap();

        let report = timeout(Duration::from_secs(2), crawler.run(["a.com", "b.com"]))
            .await
            .expect("crawl should finish after fetcher panics")
            .unwrap();

        assert!(report.graph.is_empty());
        assert_eq!(report.stats.fetch_failures, 2);
    }

    #[tokio::test]
    async fn test_no_seeds_returns_empty_graph() {
        let site = Arc::new(FakeSite::default());
        let seeds: Vec<String> = Vec::new();
        let report = crawler(site, 2, 2).run(seeds).await.unwrap();
        assert!(report.graph.is_empty());
    }

    #[tokio::test]
    async fn test_depth_bound() {
        let site = Arc::new(
            FakeSite::default()
                .page("http://d.com/0.html", r#"<a href="/1.html">1</a>"#)
                .page("http://d.com/1.html", r#"<a href="/2.html">2</a>"#)
                .page("http://d.com/2.html", r#"<a href="/3.html">3</a>"#),
        );

        let report = crawler(site.clone(), 2, 1).run(["http://d.com/0.html"]).await.unwrap();

        assert_eq!(site.hits("http://d.com/1.html"), 1);
        // Linked from depth 1, so recorded but never fetched
        assert_eq!(site.hits("http://d.com/2.html"), 0);
        assert_eq!(report.graph["http://d.com/1.html"], set(&["http://d.com/2.html"]));
        assert!(!report.graph.contains_key("http://d.com/2.html"));
    }

    #[tokio::test]
    async fn test_max_depth_zero_fetches_only_seeds() {
        let site = Arc::new(
            FakeSite::default().page("http://d.com/0.html", r#"<a href="/1.html">1</a>"#),
        );

        let report = crawler(site.clone(), 2, 0).run(["http://d.com/0.html"]).await.unwrap();

        assert_eq!(site.total_hits(), 1);
        assert_eq!(report.graph["http://d.com/0.html"], set(&["http://d.com/1.html"]));
    }

    #[tokio::test]
    async fn test_cycles_and_case_variants_fetch_once() {
        let site = Arc::new(
            FakeSite::default()
                .page("http://loop.com/a.html", r#"<a href="/B.html">b</a> <a href="/b.html">b</a>"#)
                .page("http://loop.com/b.html", r#"<a href="/a.html">a</a>"#),
        );

        let report = crawler(site.clone(), 4, 10)
            .run(["http://loop.com/a.html", "HTTP://LOOP.COM/A.HTML"])
            .await
            .unwrap();

        assert_eq!(site.hits("http://loop.com/a.html"), 1);
        assert_eq!(site.hits("http://loop.com/b.html"), 1);
        assert_eq!(report.graph["http://loop.com/b.html"], set(&["http://loop.com/a.html"]));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_dense_site_every_page_fetched_exactly_once() {
        // 40 pages, each linking to the next five (wrapping around)
        let mut site = FakeSite::default().with_delay(Duration::from_millis(1));
        for i in 0..40 {
            let links: String = (1..=5)
                .map(|k| format!(r#"<a href="/p{}.html">x</a>"#, (i + k) % 40))
                .collect();
            site = site.page(&format!("http://dense.com/p{}.html", i), &links);
        }
        let site = Arc::new(site);

        let report = timeout(
            Duration::from_secs(10),
            crawler(site.clone(), 8, 50).run(["http://dense.com/p0.html"]),
        )
        .await
        .expect("crawl should not hang")
        .unwrap();

        for i in 0..40 {
            assert_eq!(site.hits(&format!("http://dense.com/p{}.html", i)), 1, "page {}", i);
        }
        assert_eq!(report.graph.len(), 40);
        assert_eq!(report.stats.items_enqueued, 40);
    }
}
