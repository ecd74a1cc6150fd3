use std::time::Duration;
use url::Url;

use super::link::DEFAULT_EXCLUDED_NAMESPACES;

/// Default timeout for link requests in seconds
pub const LINK_REQUEST_TIMEOUT_SEC: u64 = 10;
/// How long `add_work` may wait for room in the queue, in seconds
pub const ENQUEUE_TIMEOUT_SEC: u64 = 5;
/// Cookie the wiki keeps its login session in
pub const DEFAULT_SESSION_COOKIE: &str = "wikidb2_is__session";

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    pub base_url: String,
    pub session: Option<String>,
    pub session_cookie: String,
    pub worker_count: usize,
    pub queue_capacity: usize,
    pub request_timeout: Duration,
    pub enqueue_timeout: Duration,
    pub excluded_namespaces: Vec<String>,
}

impl CrawlerConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            session: None,
            session_cookie: DEFAULT_SESSION_COOKIE.to_string(),
            worker_count: 10,
            queue_capacity: 1000,
            request_timeout: Duration::from_secs(LINK_REQUEST_TIMEOUT_SEC),
            enqueue_timeout: Duration::from_secs(ENQUEUE_TIMEOUT_SEC),
            excluded_namespaces: DEFAULT_EXCLUDED_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect(),
        }
    }

    pub fn with_session(mut self, session: impl Into<String>) -> Self {
        self.session = Some(session.into());
        self
    }

    pub fn with_session_cookie(mut self, name: impl Into<String>) -> Self {
        self.session_cookie = name.into();
        self
    }

    pub fn with_worker_count(mut self, worker_count: usize) -> Self {
        self.worker_count = worker_count;
        self
    }

    pub fn with_queue_capacity(mut self, queue_capacity: usize) -> Self {
        self.queue_capacity = queue_capacity;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_enqueue_timeout(mut self, timeout: Duration) -> Self {
        self.enqueue_timeout = timeout;
        self
    }

    pub fn with_excluded_namespaces(mut self, namespaces: Vec<String>) -> Self {
        self.excluded_namespaces = namespaces;
        self
    }

    /// Parses the base url.
    pub fn parse_base_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}
