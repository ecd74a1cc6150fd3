use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tokio::sync::{Mutex, Notify, RwLock};
use tokio::task::JoinHandle;

use super::error::CrawlError;
use super::link_set::Link;
use super::result::{CrawlResult, CrawlResultRef};
use super::runner::Crawler;
use super::wait_group::WaitGroup;

/// Bounded frontier plus the worker pool draining it.
///
/// Every link goes Queued -> InProgress -> Completed. The crawl is finished
/// when the wait group, incremented on submit and decremented on completion,
/// is back at zero.
pub struct WorkQueue {
    crawler: Arc<Crawler>,
    /// `None` once the queue has been closed.
    todo: RwLock<Option<mpsc::Sender<Link>>>,
    inbox: Mutex<mpsc::Receiver<Link>>,
    wait: WaitGroup,
    capacity: usize,
    enqueue_timeout: Duration,
    workers: std::sync::Mutex<Vec<JoinHandle<()>>>,
    failure: std::sync::Mutex<Option<CrawlError>>,
    aborted: Notify,
    pub result: CrawlResultRef,
}

impl WorkQueue {
    pub fn new(
        crawler: Arc<Crawler>,
        capacity: usize,
        enqueue_timeout: Duration,
    ) -> Result<Arc<Self>, CrawlError> {
        if capacity == 0 {
            return Err(CrawlError::InvalidConfig(
                "queue capacity must be greater than 0".to_string(),
            ));
        }
        let (tx, rx) = mpsc::channel(capacity);

        Ok(Arc::new(Self {
            crawler,
            todo: RwLock::new(Some(tx)),
            inbox: Mutex::new(rx),
            wait: WaitGroup::new(),
            capacity,
            enqueue_timeout,
            workers: std::sync::Mutex::new(Vec::new()),
            failure: std::sync::Mutex::new(None),
            aborted: Notify::new(),
            result: Arc::new(CrawlResult::new()),
        }))
    }

    /// Submits `link`. The unit of work is counted before it is offered to the
    /// channel, so a caller that is itself a unit of work keeps the count
    /// above zero until its children are queued.
    ///
    /// Fails with `QueueFull` if the channel has no room within the enqueue
    /// timeout; that is fatal for the crawl.
    pub async fn add_work(&self, link: Link) -> Result<(), CrawlError> {
        self.wait.add(1);

        let sender = self.todo.read().await.clone();
        let Some(sender) = sender else {
            self.wait.done();
            return Err(CrawlError::QueueClosed(link));
        };

        match sender.send_timeout(link, self.enqueue_timeout).await {
            Ok(()) => Ok(()),
            Err(SendTimeoutError::Timeout(link)) => Err(CrawlError::QueueFull {
                link,
                capacity: self.capacity,
                timeout: self.enqueue_timeout,
            }),
            Err(SendTimeoutError::Closed(link)) => {
                self.wait.done();
                Err(CrawlError::QueueClosed(link))
            }
        }
    }

    /// Spawns `pool` workers on the current runtime.
    pub fn start(self: &Arc<Self>, pool: usize) {
        let mut workers = self.workers.lock().unwrap_or_else(PoisonError::into_inner);
        for _ in 0..pool {
            let queue = Arc::clone(self);
            workers.push(tokio::spawn(queue.run_worker()));
        }
    }

    async fn run_worker(self: Arc<Self>) {
        loop {
            let next = self.inbox.lock().await.recv().await;
            let Some(link) = next else {
                break;
            };

            if let Err(error) = self.crawler.follow_link(&link, &self).await {
                self.fail(error);
            }
            // completion does not depend on how the visit went
            self.wait.done();
        }
    }

    /// Records a fatal error and wakes `wait`. Only the first error is kept.
    pub fn fail(&self, error: CrawlError) {
        let mut failure = self.failure.lock().unwrap_or_else(PoisonError::into_inner);
        if failure.is_none() {
            self.crawler.observer().on_fatal(&error);
            *failure = Some(error);
            self.aborted.notify_one();
        }
    }

    /// Number of submitted units of work that have not completed yet.
    pub fn pending(&self) -> usize {
        self.wait.pending()
    }

    /// Blocks until every submitted unit of work has completed, then closes
    /// the channel so the workers exit. Call once per queue.
    ///
    /// If a worker failed fatally the remaining workers are aborted and the
    /// error is returned instead.
    pub async fn wait(&self) -> Result<(), CrawlError> {
        tokio::select! {
            _ = self.wait.wait() => {}
            _ = self.aborted.notified() => {}
        }

        self.todo.write().await.take();
        let workers = std::mem::take(
            &mut *self.workers.lock().unwrap_or_else(PoisonError::into_inner),
        );

        let failure = self
            .failure
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(error) = failure {
            for worker in &workers {
                worker.abort();
            }
            return Err(error);
        }

        for worker in workers {
            worker.await?;
        }
        Ok(())
    }
}
