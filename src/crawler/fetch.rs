use reqwest::cookie::Jar;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use url::Url;

use super::config::CrawlerConfig;
use super::error::CrawlError;

/// Outcome of a GET that reached the server.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    /// Url the response came from, after redirects.
    pub final_url: Url,
    /// Empty unless `status` is a success.
    pub body: String,
}

/// HTTP client shared by all workers.
///
/// Holds no per-request state; the session cookie lives in a jar scoped to
/// the wiki host.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(base: &Url, config: &CrawlerConfig) -> Result<Self, CrawlError> {
        let jar = Arc::new(Jar::default());
        if let Some(session) = &config.session {
            let cookie = format!("{}={}; Path=/", config.session_cookie, session);
            jar.add_cookie_str(&cookie, base);
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .cookie_provider(jar)
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url`. Transport failures (connect, dns, timeout) come back as
    /// `Err`; any HTTP status comes back as `Ok`.
    pub async fn get(&self, url: &str) -> Result<Page, reqwest::Error> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let final_url = response.url().clone();

        let body = if status.is_success() {
            response.text().await?
        } else {
            String::new()
        };

        Ok(Page {
            status,
            final_url,
            body,
        })
    }
}
