//! Configuration for a harvest run.

use serde::{Deserialize, Serialize};

/// Configuration for the harvest pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Source label stamped on every emitted record
    pub source: String,

    /// Agency base URL used to absolutize relative links
    pub base_url: String,

    /// User-Agent header sent on detail-page requests
    pub user_agent: String,

    /// Per-request fetch timeout in seconds (one bounded attempt,
    /// no retries at this layer)
    pub fetch_timeout_secs: u64,

    /// Maximum records per delivery batch
    pub batch_size: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            source: "SANRAL".to_string(),
            base_url: "https://www.nra.co.za".to_string(),
            user_agent: "Mozilla/5.0 (compatible; TenderHarvest/0.1)".to_string(),
            fetch_timeout_secs: 15,
            batch_size: 10,
        }
    }
}

impl HarvestConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source label.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the agency base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set the per-request fetch timeout.
    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    /// Set the maximum batch size.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }
}
