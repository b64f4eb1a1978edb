//! Mock fetcher for testing.
//!
//! Canned detail pages and injectable failures, with call tracking so
//! tests can assert which URLs the pipeline actually requested.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult};
use crate::fetch::{DetailDocument, DetailFetcher};

/// Failure modes the mock can simulate for a URL.
#[derive(Debug, Clone)]
enum MockFailure {
    Timeout,
    Status(u16),
}

/// Mock detail fetcher with canned responses.
///
/// Unknown URLs answer with a 404 status failure.
///
/// # Example
///
/// ```rust
/// use tender_harvest::testing::MockFetcher;
///
/// let mock = MockFetcher::new()
///     .with_page("https://example.org/tender/1", "<html>...</html>")
///     .with_timeout("https://example.org/tender/2");
/// ```
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    failures: Arc<RwLock<HashMap<String, MockFailure>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a canned page (builder pattern).
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.add_page(url, html);
        self
    }

    /// Make a URL time out (builder pattern).
    pub fn with_timeout(self, url: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(url.into(), MockFailure::Timeout);
        self
    }

    /// Make a URL answer with a non-success status (builder pattern).
    pub fn with_status(self, url: impl Into<String>, status: u16) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(url.into(), MockFailure::Status(status));
        self
    }

    /// Add a canned page.
    pub fn add_page(&self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.write().unwrap().insert(url.into(), html.into());
    }

    /// Number of fetch calls made so far.
    pub fn fetch_call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }

    /// URLs requested, in call order.
    pub fn fetch_calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl DetailFetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<DetailDocument> {
        self.calls.write().unwrap().push(url.to_string());

        if let Some(failure) = self.failures.read().unwrap().get(url) {
            return Err(match failure {
                MockFailure::Timeout => FetchError::Timeout {
                    url: url.to_string(),
                },
                MockFailure::Status(status) => FetchError::Status {
                    status: *status,
                    url: url.to_string(),
                },
            });
        }

        match self.pages.read().unwrap().get(url) {
            Some(html) => Ok(DetailDocument::new(url, html.clone())),
            None => Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_canned_pages_and_records_calls() {
        let mock = MockFetcher::new().with_page("https://example.org/a", "<p>A</p>");

        let doc = mock.fetch("https://example.org/a").await.unwrap();
        assert_eq!(doc.html, "<p>A</p>");
        assert_eq!(mock.fetch_calls(), vec!["https://example.org/a".to_string()]);
    }

    #[tokio::test]
    async fn simulates_timeout_and_status_failures() {
        let mock = MockFetcher::new()
            .with_timeout("https://example.org/slow")
            .with_status("https://example.org/gone", 500);

        assert!(matches!(
            mock.fetch("https://example.org/slow").await,
            Err(FetchError::Timeout { .. })
        ));
        assert!(matches!(
            mock.fetch("https://example.org/gone").await,
            Err(FetchError::Status { status: 500, .. })
        ));
        assert!(matches!(
            mock.fetch("https://example.org/unknown").await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(mock.fetch_call_count(), 3);
    }
}
