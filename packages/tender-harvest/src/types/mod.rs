//! Data types for the harvest pipeline.

pub mod config;
pub mod summary;
pub mod tender;

pub use config::HarvestConfig;
pub use summary::{parse_summary_response, RawSummaryItem, SummaryResponse};
pub use tender::{NormalizedTender, SupportingDoc, TenderBase};
