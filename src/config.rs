use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::crawler::{
    CrawlerConfig, DEFAULT_EXCLUDED_NAMESPACES, DEFAULT_SESSION_COOKIE, ENQUEUE_TIMEOUT_SEC,
    LINK_REQUEST_TIMEOUT_SEC,
};

/// Log levels as defined in log2 crate
#[derive(Debug, Serialize, Deserialize, Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

/// This struct is supposed to receive all program arguments while CrawlerConfig
/// describes only the crawler
#[derive(Parser, Debug, Serialize, Deserialize)]
#[command(author, version, about = "Finds every reachable and every broken page of a wiki", long_about = None)]
pub struct Config {
    /// Base url of the wiki, only links under it are followed
    #[arg(short, long)]
    pub wiki: String,
    /// Page to start from, defaults to the wiki base url
    #[arg(long)]
    pub seed: Option<String>,
    /// Session token sent as a cookie to the wiki host
    #[arg(long)]
    pub session: Option<String>,
    /// Name of the session cookie
    #[arg(long, default_value = DEFAULT_SESSION_COOKIE)]
    pub session_cookie: String,
    /// Number of concurrent workers
    #[arg(long, default_value = "10")]
    pub workers: usize,
    /// Maximum number of links waiting in the queue
    #[arg(long, default_value = "1000")]
    pub queue_capacity: usize,
    /// Timeout for a single page fetch in seconds
    #[arg(long, default_value_t = LINK_REQUEST_TIMEOUT_SEC)]
    pub request_timeout: u64,
    /// How long to wait for room in a full queue before giving up, in seconds
    #[arg(long, default_value_t = ENQUEUE_TIMEOUT_SEC)]
    pub enqueue_timeout: u64,
    /// Title prefix to skip, may be repeated. Replaces the default namespace list
    #[arg(short, long = "exclude")]
    pub excluded_namespaces: Vec<String>,
    /// Output file for a JSON report
    #[arg(short, long)]
    pub output_file: Option<PathBuf>,
    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", value_enum)]
    pub log_level: LogLevel,
}

impl Config {
    pub fn new() -> Self {
        Self::parse()
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.workers == 0 {
            anyhow::bail!("workers must be greater than 0");
        }
        if self.queue_capacity == 0 {
            anyhow::bail!("queue_capacity must be greater than 0");
        }
        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }
        if self.enqueue_timeout == 0 {
            anyhow::bail!("enqueue_timeout must be greater than 0");
        }
        Ok(())
    }

    pub fn seed(&self) -> &str {
        self.seed.as_deref().unwrap_or(&self.wiki)
    }

    /// Crawler settings derived from the command line.
    pub fn crawler_config(&self) -> CrawlerConfig {
        let excluded = if self.excluded_namespaces.is_empty() {
            DEFAULT_EXCLUDED_NAMESPACES
                .iter()
                .map(|ns| ns.to_string())
                .collect()
        } else {
            self.excluded_namespaces.clone()
        };

        let config = CrawlerConfig::new(self.wiki.clone())
            .with_session_cookie(self.session_cookie.clone())
            .with_worker_count(self.workers)
            .with_queue_capacity(self.queue_capacity)
            .with_request_timeout(Duration::from_secs(self.request_timeout))
            .with_enqueue_timeout(Duration::from_secs(self.enqueue_timeout))
            .with_excluded_namespaces(excluded);

        match &self.session {
            Some(session) => config.with_session(session.clone()),
            None => config,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("wikicrawl").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cfg = parse(&["--wiki", "http://wiki.local"]);
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.seed(), "http://wiki.local");

        let crawler = cfg.crawler_config();
        assert_eq!(crawler.worker_count, 10);
        assert_eq!(crawler.queue_capacity, 1000);
        assert_eq!(crawler.request_timeout, Duration::from_secs(10));
        assert_eq!(crawler.enqueue_timeout, Duration::from_secs(5));
        assert_eq!(crawler.session_cookie, "wikidb2_is__session");
        assert_eq!(crawler.excluded_namespaces.len(), DEFAULT_EXCLUDED_NAMESPACES.len());
        assert!(crawler.session.is_none());
    }

    #[test]
    fn test_overrides() {
        let cfg = parse(&[
            "--wiki", "http://wiki.local",
            "--seed", "http://wiki.local/index.php?title=Start",
            "--session", "abc",
            "--workers", "3",
            "--exclude", "Draft:",
            "--exclude", "Archive:",
            "--log-level", "debug",
        ]);
        assert_eq!(cfg.seed(), "http://wiki.local/index.php?title=Start");
        assert_eq!(cfg.log_level.to_string(), "debug");

        let crawler = cfg.crawler_config();
        assert_eq!(crawler.worker_count, 3);
        assert_eq!(crawler.session.as_deref(), Some("abc"));
        assert_eq!(crawler.excluded_namespaces, vec!["Draft:", "Archive:"]);
    }

    #[test]
    fn test_validate_rejects_zero_workers() {
        let cfg = parse(&["--wiki", "http://wiki.local", "--workers", "0"]);
        assert!(cfg.validate().is_err());
    }
}
