use log2::*;

use super::error::CrawlError;

/// Receives structured events from the crawl engine.
///
/// Every method has a no-op default, implement only what you need. Methods
/// are called from worker tasks concurrently.
pub trait CrawlObserver: Send + Sync {
    /// A link was claimed and is about to be fetched.
    fn on_visit(&self, _url: &str) {}

    /// The response came from a different url than requested.
    fn on_redirect(&self, _requested: &str, _final_url: &str) {}

    /// A link was recorded as broken.
    fn on_broken(&self, _url: &str, _reason: &str) {}

    /// A discovered link was not queued.
    fn on_skip(&self, _url: &str) {}

    /// A discovered link was handed to the work queue.
    fn on_enqueue(&self, _url: &str) {}

    /// The crawl is about to stop with an error.
    fn on_fatal(&self, _error: &CrawlError) {}
}

/// Discards every event.
pub struct NoopObserver;

impl CrawlObserver for NoopObserver {}

/// Forwards events to the `log2` logger.
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn on_visit(&self, url: &str) {
        debug!("Crawling new url {}", url);
    }

    fn on_redirect(&self, requested: &str, final_url: &str) {
        warn!("Redirect detected: {} -> {}", requested, final_url);
    }

    fn on_broken(&self, url: &str, reason: &str) {
        warn!("Broken link {}: {}", url, reason);
    }

    fn on_skip(&self, url: &str) {
        trace!("Skipping link {}", url);
    }

    fn on_enqueue(&self, url: &str) {
        trace!("Queued {}", url);
    }

    fn on_fatal(&self, error: &CrawlError) {
        error!("Crawl aborted: {}", error);
    }
}
