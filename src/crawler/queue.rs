use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::mpsc;
use tokio::sync::{Mutex, Notify};

/// Bounded work queue with completion tracking
///
/// A bounded mpsc channel provides the crawl's only backpressure: `put`
/// suspends while the queue is full. The queue also counts outstanding
/// tasks, where a task is outstanding from `put` until `task_done`, so
/// `join` waits for every admitted URL to be fully processed rather than
/// merely received by a worker.
///
/// `put` must be driven to completion; cancelling it mid-send leaks one
/// outstanding-task count and `join` would wait forever.
pub(crate) struct CrawlQueue {
    tx: mpsc::Sender<String>,
    rx: Mutex<mpsc::Receiver<String>>,
    pending: AtomicUsize,
    drained: Notify,
}

impl CrawlQueue {
    pub(crate) fn new(capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel(capacity);
        Self {
            tx,
            rx: Mutex::new(rx),
            pending: AtomicUsize::new(0),
            drained: Notify::new(),
        }
    }

    /// Adds a URL, waiting while the queue is full
    pub(crate) async fn put(&self, url: String) {
        self.pending.fetch_add(1, Ordering::AcqRel);
        if self.tx.send(url).await.is_err() {
            // The receiver is gone, so nothing will ever process the task.
            self.task_done();
        }
    }

    /// Takes the next URL, or `None` once the queue is closed
    pub(crate) async fn take(&self) -> Option<String> {
        self.rx.lock().await.recv().await
    }

    /// Marks one taken task as fully processed
    pub(crate) fn task_done(&self) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            self.drained.notify_waiters();
        }
    }

    /// Waits until every admitted task has been processed
    pub(crate) async fn join(&self) {
        let mut drained = std::pin::pin!(self.drained.notified());
        loop {
            if self.pending.load(Ordering::Acquire) == 0 {
                return;
            }
            // Register before the re-check so a task_done between the check
            // and the await still wakes us.
            drained.as_mut().enable();
            if self.pending.load(Ordering::Acquire) == 0 {
                return;
            }
            drained.as_mut().await;
            drained.set(self.drained.notified());
        }
    }
}
