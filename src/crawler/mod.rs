pub mod config;
pub mod error;
pub mod fetch;
pub mod link;
pub mod link_set;
pub mod observer;
pub mod queue;
pub mod result;
pub mod runner;
pub mod scrape;
pub mod wait_group;


pub use config::{CrawlerConfig, DEFAULT_SESSION_COOKIE, ENQUEUE_TIMEOUT_SEC, LINK_REQUEST_TIMEOUT_SEC};
pub use error::CrawlError;
pub use link::{DEFAULT_EXCLUDED_NAMESPACES, normalize_url, validate_link, wiki_page_title};
pub use link_set::{Link, LinkSet};
pub use observer::{CrawlObserver, LogObserver, NoopObserver};
pub use queue::WorkQueue;
pub use result::{CrawlResult, CrawlResultRef, ReferenceMap};
pub use runner::Crawler;
pub use scrape::extract_links;
