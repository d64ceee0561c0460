//! Upstream HTTP access.
//!
//! One trait seam, [`PageFetcher`], separates the pipeline from the
//! network: the real [`HttpFetcher`] sends browser-shaped requests the
//! upstream CMS insists on, while tests substitute canned pages. A
//! non-success status is part of the result rather than an error, since
//! category probing has to look at statuses to make progress.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, PRAGMA, REFERER,
    UPGRADE_INSECURE_REQUESTS, USER_AGENT,
};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::error::{NewsError, Result};

/// One upstream page, as delivered.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    /// Whether the upstream answered with the page proper.
    pub fn ok(&self) -> bool {
        self.status == 200
    }
}

/// Transport for upstream pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Retrieve one page. Transport failures are errors; HTTP status is
    /// reported through [`FetchedPage`].
    async fn fetch(&self, url: &Url) -> Result<FetchedPage>;
}

/// Configuration for the HTTP fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Referer the upstream expects to see
    pub referer: String,

    /// User agent string
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            referer: "https://news.hfut.edu.cn".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36 Edg/131.0.0.0".to_string(),
        }
    }
}

/// Real HTTP transport.
///
/// The header set mimics a desktop Edge navigation; the CMS serves
/// different (sometimes empty) documents to clients that look like bots.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("zh-CN,zh;q=0.9,en-US;q=0.8,en;q=0.7,en-GB;q=0.6"),
        );
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
        headers.insert(
            HeaderName::from_static("priority"),
            HeaderValue::from_static("u=0, i"),
        );
        headers.insert(
            HeaderName::from_static("sec-ch-ua"),
            HeaderValue::from_static(
                r#""Microsoft Edge";v="131", "Chromium";v="131", "Not_A Brand";v="24""#,
            ),
        );
        headers.insert(
            HeaderName::from_static("sec-ch-ua-mobile"),
            HeaderValue::from_static("?0"),
        );
        headers.insert(
            HeaderName::from_static("sec-ch-ua-platform"),
            HeaderValue::from_static(r#""Windows""#),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-dest"),
            HeaderValue::from_static("document"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-mode"),
            HeaderValue::from_static("navigate"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-site"),
            HeaderValue::from_static("same-origin"),
        );
        headers.insert(
            HeaderName::from_static("sec-fetch-user"),
            HeaderValue::from_static("?1"),
        );
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
        headers.insert(
            REFERER,
            HeaderValue::from_str(&config.referer)
                .unwrap_or_else(|_| HeaderValue::from_static("https://news.hfut.edu.cn")),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("Mozilla/5.0")),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }

    /// Create a fetcher with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(FetcherConfig::default())
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        debug!(%url, "requesting upstream page");
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(map_transport)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport)?;
        info!(%url, status, bytes = body.len(), "fetched upstream page");
        Ok(FetchedPage { status, body })
    }
}

fn map_transport(err: reqwest::Error) -> NewsError {
    if err.is_timeout() {
        NewsError::UpstreamTimeout
    } else {
        NewsError::Http(err)
    }
}

/// Canned-page transport for tests. Unregistered URLs answer 404 with an
/// empty body, and every request is recorded.
#[cfg(test)]
pub struct FixtureFetcher {
    pages: std::collections::HashMap<String, (u16, String)>,
    hits: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl FixtureFetcher {
    pub fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
            hits: std::sync::Mutex::new(Vec::new()),
        }
    }

    pub fn with_page(mut self, url: &str, status: u16, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), (status, body.into()));
        self
    }

    /// URLs requested so far, in order.
    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl PageFetcher for FixtureFetcher {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn fetch(&self, url: &Url) -> Result<FetchedPage> {
        self.hits.lock().unwrap().push(url.to_string());
        match self.pages.get(url.as_str()) {
            Some((status, body)) => Ok(FetchedPage {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(FetchedPage {
                status: 404,
                body: String::new(),
            }),
        }
    }
}
