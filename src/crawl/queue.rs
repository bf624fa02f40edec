// src/crawl/queue.rs
// =============================================================================
// The frontier: a FIFO work queue of (depth, url) items shared by all workers.
//
// How it works:
// 1. put() appends an item and bumps the outstanding counter
// 2. get() hands the oldest item to a worker, or waits until one arrives
// 3. The worker processes it (possibly put()-ing children) and then calls
//    mark_done(), which drops the counter
// 4. join() returns once the counter is back at zero: every item ever put
//    has been dequeued AND acknowledged
//
// Because a worker puts its children before acknowledging the parent, the
// counter can never touch zero while reachable work is still pending.
//
// cancel() releases every worker parked in get(), so the pool can be shut
// down once join() says the frontier is exhausted.
//
// Rust concepts:
// - VecDeque: push_back / pop_front for FIFO order
// - AtomicUsize: a counter many tasks can change without a lock
// - Notify: a wake-up primitive for async tasks
// - CancellationToken: a one-shot "stop" signal tasks can await
// =============================================================================

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::trace;

// One unit of crawl work: fetch `url`, which was found `depth` links away
// from a seed. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub depth: usize,
    pub url: String,
}

impl WorkItem {
    pub fn new(depth: usize, url: impl Into<String>) -> Self {
        Self {
            depth,
            url: url.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    // Not a failure: the crawl is over and the worker should stop
    #[error("queue cancelled")]
    Cancelled,

    #[error("mark_done() called more times than items were put")]
    TooManyDone,
}

pub struct FrontierQueue {
    items: Mutex<VecDeque<WorkItem>>,
    // Items put but not yet acknowledged with mark_done()
    outstanding: AtomicUsize,
    available: Notify,
    drained: Notify,
    cancel: CancellationToken,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            outstanding: AtomicUsize::new(0),
            available: Notify::new(),
            drained: Notify::new(),
            cancel: CancellationToken::new(),
        }
    }

    // Appends an item to the tail. Never blocks.
    //
    // The counter goes up before the item becomes visible, so a consumer
    // can never acknowledge an item the counter doesn't know about yet.
    pub fn put(&self, item: WorkItem) {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        trace!(depth = item.depth, url = %item.url, "put");
        self.lock_items().push_back(item);
        self.available.notify_one();
    }

    // Takes the oldest item, waiting for one if the queue is empty
    //
    // Returns: Err(Cancelled) once cancel() has been called, even if items
    // are still buffered. A worker must not pick up stale work after the
    // crawl has been declared finished.
    pub async fn get(&self) -> Result<WorkItem, QueueError> {
        loop {
            if self.cancel.is_cancelled() {
                return Err(QueueError::Cancelled);
            }

            // Register interest *before* checking the buffer. A put() that
            // lands between the check and the await still wakes us.
            let notified = self.available.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(item) = self.lock_items().pop_front() {
                return Ok(item);
            }

            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(QueueError::Cancelled),
                _ = &mut notified => {}
            }
        }
    }

    // Acknowledges that one dequeued item is fully processed
    //
    // Must be called exactly once per item, after any put() of its children.
    // When the counter reaches zero, every join() waiter is woken.
    pub fn mark_done(&self) -> Result<(), QueueError> {
        let previous = self
            .outstanding
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .map_err(|_| QueueError::TooManyDone)?;

        if previous == 1 {
            trace!("frontier drained");
            self.drained.notify_waiters();
        }
        Ok(())
    }

    // Waits until every item ever put has been marked done
    //
    // Returns immediately if nothing is outstanding (including a queue that
    // never received any item).
    pub async fn join(&self) {
        loop {
            let drained = self.drained.notified();
            tokio::pin!(drained);
            drained.as_mut().enable();

            if self.outstanding() == 0 {
                return;
            }
            drained.await;
        }
    }

    // Signals every current and future get() to return Cancelled
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    // Number of items buffered and not yet handed to a worker
    pub fn len(&self) -> usize {
        self.lock_items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_items().is_empty()
    }

    // The lock is only ever held for a push or pop, so a poisoned mutex
    // still guards a consistent VecDeque
    fn lock_items(&self) -> std::sync::MutexGuard<'_, VecDeque<WorkItem>> {
        self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for FrontierQueue {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why not just use an mpsc channel?
//    - A channel tells you when an item is *received*, not when it has been
//      *processed*. A worker that just dequeued a page may be about to
//      discover fifty more, so "channel is empty" doesn't mean "crawl is done"
//    - The outstanding counter tracks processing, which is what join() needs
//
// 2. Why enable() on the Notified future?
//    - notified() alone doesn't register the task as a waiter until it is
//      first polled. enable() registers it right away, so a notify that
//      fires between our check and our .await is not lost
//
// 3. Why std::sync::Mutex in async code?
//    - The lock is held for one push/pop and never across an .await, so a
//      blocking mutex is cheaper than tokio's async one and can't deadlock
//
// 4. Why biased select?
//    - With `biased`, the cancellation branch is always polled first, so a
//      cancelled queue never hands out one last item
// -----------------------------------------------------------------------------
