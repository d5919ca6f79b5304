use crate::types::{BuildError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_redirects: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("newsroll/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_seconds: 30,
            max_redirects: 5,
        }
    }
}

/// Seam for retrieving one feed body. The production implementation is
/// [`HttpFetcher`]; tests substitute canned bodies or canned errors.
#[async_trait]
pub trait FetchFeed: Send + Sync {
    /// Retrieve the raw body at `url`. A single attempt; any transport
    /// error, timeout, or non-2xx status is a [`BuildError::Fetch`].
    async fn fetch(&self, url: &Url) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FetchFeed for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String> {
        debug!("Fetching feed: {}", url);

        let response =
            self.client.get(url.clone()).send().await.map_err(|e| BuildError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(BuildError::Fetch {
                url: url.to_string(),
                reason: format!(
                    "HTTP {}: {}",
                    status,
                    status.canonical_reason().unwrap_or("Unknown")
                ),
            });
        }

        let body = response.text().await.map_err(|e| BuildError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        info!("Fetched feed: {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
