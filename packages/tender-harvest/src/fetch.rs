//! Detail-page fetching.
//!
//! One bounded HTTP attempt per URL; a failure (network error,
//! timeout, non-success status) is returned as a typed outcome, never
//! thrown past this boundary. Retry policy, if any, belongs to the
//! invoking collaborator.

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{FetchError, FetchResult};
use crate::types::config::HarvestConfig;

/// Raw markup retrieved from a tender's detail page.
///
/// Owned by the record-builder invocation that fetched it and
/// discarded after extraction.
#[derive(Debug, Clone)]
pub struct DetailDocument {
    /// URL the document was fetched from
    pub url: String,

    /// Raw markup or plain text body
    pub html: String,
}

impl DetailDocument {
    /// Create a detail document from a fetched body.
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

/// Fetcher seam for detail pages.
///
/// `HttpFetcher` is the production implementation; tests inject
/// `testing::MockFetcher`.
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    /// Fetch one detail page with a single bounded attempt.
    async fn fetch(&self, url: &str) -> FetchResult<DetailDocument>;

    /// Fetcher name for logging.
    fn name(&self) -> &str {
        "unknown"
    }
}

/// HTTP fetcher over `reqwest` with a client-level timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Build a fetcher from the run configuration.
    pub fn new(config: &HarvestConfig) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(config.fetch_timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            user_agent: config.user_agent.clone(),
        }
    }

    /// Replace the underlying HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }
}

#[async_trait]
impl DetailFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<DetailDocument> {
        debug!(url = %url, "detail fetch starting");

        let response = self
            .client
            .get(url)
            .header("User-Agent", &self.user_agent)
            .send()
            .await
            .map_err(|e| {
                warn!(url = %url, error = %e, "detail fetch failed");
                if e.is_timeout() {
                    FetchError::Timeout {
                        url: url.to_string(),
                    }
                } else {
                    FetchError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "detail fetch non-success status");
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http(e)
            }
        })?;

        debug!(url = %url, content_length = html.len(), "detail fetch completed");
        Ok(DetailDocument::new(url, html))
    }

    fn name(&self) -> &str {
        "http"
    }
}
