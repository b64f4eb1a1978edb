//! Field extraction from semi-structured agency markup.
//!
//! Small, independently testable pure functions keep the fragile,
//! source-format-dependent code out of the orchestration state
//! machine.

pub mod dates;
pub mod docs;
pub mod fields;
pub mod text;
