//! Pipeline orchestration: per-item building, batching, and the
//! whole-run loop.

pub mod batch;
pub mod builder;
pub mod run;

pub use batch::assemble_batches;
pub use builder::{build_record, BuildOutcome, FailureRecord};
pub use run::{harvest, harvest_rows, HarvestOutcome, RunReport};
