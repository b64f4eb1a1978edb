//! Tender Harvest Pipeline
//!
//! Turns procurement notices published by a road-infrastructure agency
//! into normalized records ready for queue delivery. The core is a
//! dual-phase extraction: a summary-list item names a detail page,
//! the detail page is fetched once with a bounded timeout, structured
//! fields are extracted from its semi-structured markup, and the two
//! sources are reconciled into one validated record.
//!
//! Partial failure is the normal case for this data source. A fetch
//! failure degrades the item to summary-only fields rather than
//! dropping it; a validation failure excludes that single item and is
//! counted on the run report; nothing a single item does can end the
//! run.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tender_harvest::{harvest_rows, parse_summary_response, HarvestConfig, HttpFetcher};
//!
//! let config = HarvestConfig::default();
//! let fetcher = HttpFetcher::new(&config);
//!
//! // The summary-list response body comes from the invoking harness.
//! let response = parse_summary_response(&body)?;
//! let outcome = harvest_rows(&fetcher, &response.tenders, &config).await;
//!
//! for batch in &outcome.batches {
//!     // hand each batch to the delivery queue
//! }
//! ```
//!
//! # Modules
//!
//! - [`types`] - Summary items, normalized records, configuration
//! - [`fetch`] - Detail-page fetcher trait and HTTP implementation
//! - [`extract`] - Pure field extractors and the date normalizer
//! - [`pipeline`] - Record builder, batch assembler, run loop
//! - [`testing`] - Mock fetcher for tests

pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, FetchResult, HarvestError, HarvestResult, SkipReason};
pub use fetch::{DetailDocument, DetailFetcher, HttpFetcher};
pub use pipeline::{
    assemble_batches, build_record, harvest, harvest_rows, BuildOutcome, FailureRecord,
    HarvestOutcome, RunReport,
};
pub use types::{
    config::HarvestConfig,
    summary::{parse_summary_response, RawSummaryItem, SummaryResponse},
    tender::{NormalizedTender, SupportingDoc, TenderBase},
};

// Re-export testing utilities
pub use testing::MockFetcher;
