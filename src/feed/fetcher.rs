use super::item::FeedItem;
use super::parser::parse_feed;
use crate::config::models::FetchConfig;
use async_trait::async_trait;
use backoff::backoff::Backoff;
use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when fetching a feed
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("HTTP error with status code: {0}")]
    Http(u16),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Feed parsing error: {0}")]
    Parse(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

/// Retrieves a feed document and returns its items in document order.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedItem>, FetchError>;
}

/// Fetches feeds over HTTP, retrying failed attempts with exponential backoff
pub struct HttpFeedFetcher {
    client: Client,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl HttpFeedFetcher {
    /// Creates a new fetcher with a reusable HTTP client
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("rss_exporter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;

        Ok(Self {
            client,
            max_attempts: config.max_attempts.max(1),
            initial_backoff: Duration::from_millis(config.initial_backoff_ms),
        })
    }

    fn backoff(&self) -> ExponentialBackoff {
        ExponentialBackoffBuilder::new()
            .with_initial_interval(self.initial_backoff)
            .with_multiplier(2.0)
            .with_randomization_factor(0.0)
            .with_max_interval(Duration::from_secs(60))
            .with_max_elapsed_time(None)
            .build()
    }

    /// Performs a single GET and parse, without retrying
    async fn fetch_once(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        let response = self
            .client
            .get(url)
            .header(
                "Accept",
                "application/rss+xml, application/atom+xml, application/xml, text/xml",
            )
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        parse_feed(&body)
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch_feed(&self, url: &str) -> Result<Vec<FeedItem>, FetchError> {
        let mut backoff = self.backoff();
        let mut attempt = 1;

        loop {
            debug!("Fetching feed from {} (attempt {}/{})", url, attempt, self.max_attempts);

            match self.fetch_once(url).await {
                Ok(items) => {
                    debug!("Fetched {} items from {}", items.len(), url);
                    return Ok(items);
                }
                Err(e) if attempt < self.max_attempts => {
                    let delay = backoff.next_backoff().unwrap_or(self.initial_backoff);
                    warn!(
                        "Fetching {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        url, attempt, self.max_attempts, e, delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
