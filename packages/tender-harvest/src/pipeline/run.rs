//! Whole-run orchestration.
//!
//! Items are processed sequentially: each one is fully fetched,
//! extracted, reconciled, and classified before the next begins.
//! Items share no mutable state, so one item's failure never cancels
//! or corrupts another's processing.

use serde_json::Value;
use tracing::{info, warn};

use crate::error::SkipReason;
use crate::extract::text;
use crate::fetch::DetailFetcher;
use crate::pipeline::batch::assemble_batches;
use crate::pipeline::builder::{build_record, FailureRecord};
use crate::types::config::HarvestConfig;
use crate::types::summary::RawSummaryItem;
use crate::types::tender::NormalizedTender;

/// Counts for one harvest run, so operators can tell systemic outages
/// from ordinary per-page scraping gaps.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Summary items seen, including unusable rows
    pub items: usize,

    /// Detail pages successfully retrieved
    pub fetched: usize,

    /// Records that passed validation
    pub valid: usize,

    /// Excluded items with their reasons
    pub skipped: Vec<FailureRecord>,
}

impl RunReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of excluded items.
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Whether every item produced a valid record.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Output of one harvest run: ordered batches plus the run report.
#[derive(Debug)]
pub struct HarvestOutcome {
    /// Batches of at most `batch_size` records, in summary-list order
    pub batches: Vec<Vec<NormalizedTender>>,

    /// Diagnostic counts
    pub report: RunReport,
}

/// Run the pipeline over already-parsed summary items.
pub async fn harvest<F>(
    fetcher: &F,
    items: &[RawSummaryItem],
    config: &HarvestConfig,
) -> HarvestOutcome
where
    F: DetailFetcher + ?Sized,
{
    info!(items = items.len(), source = %config.source, "harvest starting");

    let mut valid = Vec::new();
    let mut report = RunReport::new();
    report.items = items.len();

    for item in items {
        process_item(fetcher, item, config, &mut valid, &mut report).await;
    }

    finish(valid, report, config)
}

/// Run the pipeline over raw positional rows from the list API.
///
/// Rows with an unusable shape become skip records without a fetch
/// attempt.
pub async fn harvest_rows<F>(
    fetcher: &F,
    rows: &[Value],
    config: &HarvestConfig,
) -> HarvestOutcome
where
    F: DetailFetcher + ?Sized,
{
    info!(rows = rows.len(), source = %config.source, "harvest starting");

    let mut valid = Vec::new();
    let mut report = RunReport::new();
    report.items = rows.len();

    for row in rows {
        match RawSummaryItem::from_row(row, &config.base_url) {
            Ok(item) => process_item(fetcher, &item, config, &mut valid, &mut report).await,
            Err(reason) => {
                warn!(%reason, "skipping unusable summary row");
                report.skipped.push(FailureRecord {
                    // Recover whatever title text the row holds for
                    // the diagnostic record.
                    title: row
                        .get(0)
                        .and_then(Value::as_str)
                        .map(text::clean)
                        .unwrap_or_default(),
                    detail_url: None,
                    reason: SkipReason::UnusableRow,
                });
            }
        }
    }

    finish(valid, report, config)
}

async fn process_item<F>(
    fetcher: &F,
    item: &RawSummaryItem,
    config: &HarvestConfig,
    valid: &mut Vec<NormalizedTender>,
    report: &mut RunReport,
) where
    F: DetailFetcher + ?Sized,
{
    let outcome = build_record(fetcher, item, config).await;
    if outcome.detail_fetched {
        report.fetched += 1;
    }
    match outcome.record {
        Ok(tender) => {
            report.valid += 1;
            valid.push(tender);
        }
        Err(failure) => {
            warn!(title = %failure.title, reason = %failure.reason, "skipping tender");
            report.skipped.push(failure);
        }
    }
}

fn finish(
    valid: Vec<NormalizedTender>,
    report: RunReport,
    config: &HarvestConfig,
) -> HarvestOutcome {
    let batches = assemble_batches(valid, config.batch_size);

    info!(
        items = report.items,
        fetched = report.fetched,
        valid = report.valid,
        skipped = report.skipped_count(),
        batches = batches.len(),
        "harvest completed"
    );

    HarvestOutcome { batches, report }
}
