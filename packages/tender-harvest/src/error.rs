//! Typed errors for the harvest pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Per-item problems are
//! never fatal: fetch failures degrade to summary-only extraction and
//! validation failures become skip records, so only the systemic
//! `HarvestError` can end a run.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors that can occur while fetching a detail page.
///
/// A fetch failure is a first-class outcome for the record builder,
/// not an exception path: the builder falls back to summary-only
/// extraction when it sees one.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP transport failed (connection, DNS, protocol)
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { status: u16, url: String },
}

/// Reason a single summary item was excluded from the output.
///
/// Recorded on the run report for diagnostics; never delivered
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkipReason {
    /// Summary row did not match the expected list-API shape
    #[error("summary row has an unusable shape")]
    UnusableRow,

    /// Summary item carried no detail-page URL
    #[error("summary item has no detail URL")]
    MissingDetailUrl,

    /// No source supplied a title
    #[error("no title from any source")]
    MissingTitle,

    /// No source supplied a description
    #[error("no description from any source")]
    MissingDescription,

    /// Closing date strictly precedes the published date
    #[error("closing date {closing} precedes published date {published}")]
    DateOrdering {
        published: NaiveDateTime,
        closing: NaiveDateTime,
    },
}

/// Systemic errors that end a run before any item is processed.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// The summary-list response could not be decoded
    #[error("summary response was not valid JSON: {0}")]
    SummaryDecode(#[from] serde_json::Error),
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for run-level operations.
pub type HarvestResult<T> = std::result::Result<T, HarvestError>;
