use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::config::CrawlerConfig;
use super::error::CrawlError;
use super::fetch::PageFetcher;
use super::link::{normalize_url, validate_link};
use super::observer::{CrawlObserver, LogObserver};
use super::queue::WorkQueue;
use super::result::CrawlResultRef;
use super::scrape::extract_links;

/// Explores a single wiki from its base url.
///
/// Immutable once built, so one instance is shared by every worker.
pub struct Crawler {
    base: Url,
    fetcher: PageFetcher,
    excluded_namespaces: Vec<String>,
    worker_count: usize,
    queue_capacity: usize,
    enqueue_timeout: Duration,
    observer: Arc<dyn CrawlObserver>,
}

impl Crawler {
    pub fn new(config: CrawlerConfig) -> Result<Self, CrawlError> {
        if config.worker_count == 0 {
            return Err(CrawlError::InvalidConfig(
                "worker count must be greater than 0".to_string(),
            ));
        }
        if config.queue_capacity == 0 {
            return Err(CrawlError::InvalidConfig(
                "queue capacity must be greater than 0".to_string(),
            ));
        }

        let base = config
            .parse_base_url()
            .map_err(|source| CrawlError::InvalidBaseUrl {
                url: config.base_url.clone(),
                source,
            })?;
        let fetcher = PageFetcher::new(&base, &config)?;

        Ok(Self {
            base,
            fetcher,
            excluded_namespaces: config.excluded_namespaces,
            worker_count: config.worker_count,
            queue_capacity: config.queue_capacity,
            enqueue_timeout: config.enqueue_timeout,
            observer: Arc::new(LogObserver),
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn CrawlObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn observer(&self) -> &dyn CrawlObserver {
        self.observer.as_ref()
    }

    /// Crawls every valid link reachable from `source` and returns what was
    /// visited and what was broken.
    pub async fn crawl(self: &Arc<Self>, source: &str) -> Result<CrawlResultRef, CrawlError> {
        let seed = normalize_url(source, &self.base).map_err(|source_err| {
            CrawlError::InvalidSeedUrl {
                url: source.to_string(),
                source: source_err,
            }
        })?;

        let queue = WorkQueue::new(Arc::clone(self), self.queue_capacity, self.enqueue_timeout)?;
        queue.start(self.worker_count);
        if let Err(error) = queue.add_work(seed.into()).await {
            queue.fail(error);
        }
        queue.wait().await?;

        Ok(Arc::clone(&queue.result))
    }

    /// Visits one link pulled off `queue` and submits every new valid link
    /// found on the page.
    ///
    /// Page-level failures end up in the broken set; only queue errors are
    /// returned.
    pub async fn follow_link(&self, source: &str, queue: &WorkQueue) -> Result<(), CrawlError> {
        let result = &queue.result;

        // Sole dedup checkpoint between workers.
        if !result.seen.add(source) {
            return Ok(());
        }
        self.observer.on_visit(source);

        let page = match self.fetcher.get(source).await {
            Ok(page) => page,
            Err(e) => {
                result.broken.add(source);
                self.observer.on_broken(source, &e.to_string());
                return Ok(());
            }
        };

        if !page.status.is_success() {
            result.broken.add(source);
            self.observer
                .on_broken(source, &format!("HTTP {}", page.status));
            return Ok(());
        }
        result.visited.add(source);

        let final_url = normalize_url(page.final_url.as_str(), &self.base).unwrap_or(page.final_url);
        if final_url.as_str() != source {
            self.observer.on_redirect(source, final_url.as_str());
            if !result.seen.add(final_url.as_str()) {
                return Ok(());
            }
            result.visited.add(final_url.as_str());
        }

        for raw in extract_links(&page.body) {
            let href = match normalize_url(&raw, &self.base) {
                Ok(href) => href,
                Err(e) => {
                    result.references.record(&raw, source);
                    result.broken.add(&raw);
                    self.observer.on_broken(&raw, &e.to_string());
                    continue;
                }
            };

            if validate_link(&href, &self.base, &self.excluded_namespaces) {
                result.references.record(href.as_str(), source);
                if !result.seen.contains(href.as_str()) {
                    self.observer.on_enqueue(href.as_str());
                    queue.add_work(href.into()).await?;
                    continue;
                }
            }
            self.observer.on_skip(href.as_str());
        }

        Ok(())
    }
}
