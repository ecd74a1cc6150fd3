use std::time::Duration;

/// Failures that stop a whole crawl.
///
/// Page-level problems (timeouts, bad statuses, unparseable hrefs) are never
/// reported through this type, they end up in the broken set instead.
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid seed url '{url}': {source}")]
    InvalidSeedUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("invalid crawler configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),

    /// The frontier outgrew the queue bound.
    #[error("work queue full: could not enqueue '{link}' within {timeout:?} (capacity {capacity})")]
    QueueFull {
        link: String,
        capacity: usize,
        timeout: Duration,
    },

    #[error("work queue already closed, dropping '{0}'")]
    QueueClosed(String),

    #[error("crawl worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
