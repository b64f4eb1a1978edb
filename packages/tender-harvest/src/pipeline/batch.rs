//! Batch assembly for queue handoff.
//!
//! Fixed-size chunking in encounter order: no reordering, no
//! cross-item de-duplication (duplicates are the delivery
//! destination's concern).

use crate::types::tender::NormalizedTender;

/// Group records into batches of at most `max_size`, preserving input
/// order. The last batch may be smaller. A zero size is treated as
/// one.
pub fn assemble_batches(
    records: Vec<NormalizedTender>,
    max_size: usize,
) -> Vec<Vec<NormalizedTender>> {
    let size = max_size.max(1);
    let mut batches = Vec::with_capacity(records.len().div_ceil(size));
    let mut current = Vec::with_capacity(size.min(records.len()));

    for record in records {
        current.push(record);
        if current.len() == size {
            batches.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        batches.push(current);
    }

    batches
}
