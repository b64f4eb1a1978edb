//! Per-item record building.
//!
//! One summary item moves through fetch → extract → reconcile →
//! validate. A fetch failure degrades to summary-only extraction
//! instead of dropping the item; a validation failure produces a
//! `FailureRecord` instead of a tender. Neither aborts the run.

use chrono::NaiveDateTime;
use tracing::{debug, warn};

use crate::error::SkipReason;
use crate::extract::{dates, docs, fields};
use crate::fetch::{DetailDocument, DetailFetcher};
use crate::types::config::HarvestConfig;
use crate::types::summary::RawSummaryItem;
use crate::types::tender::{NormalizedTender, SupportingDoc, TenderBase};

/// Diagnostic bookkeeping for an excluded item. Never delivered
/// downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureRecord {
    /// Title of the original item, as far as it was recoverable
    pub title: String,

    /// Detail URL, when the item carried one
    pub detail_url: Option<String>,

    /// Why the item was excluded
    pub reason: SkipReason,
}

/// Outcome of building one summary item.
#[derive(Debug)]
pub struct BuildOutcome {
    /// The normalized tender, or the skip bookkeeping
    pub record: Result<NormalizedTender, FailureRecord>,

    /// Whether the detail page was successfully retrieved
    pub detail_fetched: bool,
}

/// Fields extracted from a detail document. Each extractor result is
/// independent; a gap in one never blocks the others.
#[derive(Debug, Default)]
struct DetailFields {
    title: Option<String>,
    description: Option<String>,
    notice_text: Option<String>,
    published: Option<NaiveDateTime>,
    closing: Option<NaiveDateTime>,
    tender_number: Option<String>,
    category: Option<String>,
    region: Option<String>,
    docs: Vec<SupportingDoc>,
}

impl DetailFields {
    fn extract(doc: &DetailDocument) -> Self {
        let html = &doc.html;

        Self {
            title: fields::page_title(html),
            description: fields::first_heading(html),
            notice_text: fields::notice_text(html),
            published: fields::labeled_value(html, "Create Date")
                .or_else(|| fields::labeled_value(html, "Published Date"))
                .and_then(|value| parse_date_cell(&value)),
            closing: fields::labeled_value(html, "Closing Date")
                .and_then(|value| parse_date_cell(&value)),
            tender_number: fields::tender_number(html),
            category: fields::category(html),
            region: fields::region(html),
            docs: docs::supporting_docs(html, &doc.url),
        }
    }
}

/// Parse a labeled date cell, tolerating surrounding prose.
fn parse_date_cell(value: &str) -> Option<NaiveDateTime> {
    dates::parse_date(value).or_else(|| dates::find_date(value))
}

/// Build one summary item into a normalized tender or a skip record.
pub async fn build_record<F>(
    fetcher: &F,
    item: &RawSummaryItem,
    config: &HarvestConfig,
) -> BuildOutcome
where
    F: DetailFetcher + ?Sized,
{
    // Items without a detail URL are unusable; the fetcher is never
    // invoked for them.
    let detail_url = match item.detail_url.as_deref() {
        Some(url) => url,
        None => {
            return BuildOutcome {
                record: Err(skip(item, SkipReason::MissingDetailUrl)),
                detail_fetched: false,
            }
        }
    };

    // Fetching. A failure degrades to summary-only extraction.
    let document = match fetcher.fetch(detail_url).await {
        Ok(doc) => Some(doc),
        Err(e) => {
            warn!(url = %detail_url, error = %e, "detail fetch failed, using summary fields only");
            None
        }
    };
    let detail_fetched = document.is_some();

    // Extracting.
    let detail = document.as_ref().map(DetailFields::extract);

    // Reconciling and validation.
    let record = reconcile(item, detail.unwrap_or_default(), detail_url, config)
        .map_err(|reason| skip(item, reason));

    if let Ok(ref tender) = record {
        debug!(
            title = %tender.base.title,
            tender_number = %tender.tender_number,
            detail_fetched,
            "record built"
        );
    }

    BuildOutcome {
        record,
        detail_fetched,
    }
}

/// Merge summary and detail fields into a validated tender.
///
/// Detail-page values win per field; the summary value is the
/// fallback. That includes `publishedDate`: the summary date is used
/// only when the detail page yielded no parseable date.
fn reconcile(
    item: &RawSummaryItem,
    detail: DetailFields,
    detail_url: &str,
    config: &HarvestConfig,
) -> Result<NormalizedTender, SkipReason> {
    let title = detail.title.unwrap_or_else(|| item.title.clone());
    let description = detail
        .description
        .unwrap_or_else(|| item.description.clone());
    let full_notice_text = detail
        .notice_text
        .unwrap_or_else(|| item.notice_text.clone());

    let published_date = detail
        .published
        .or_else(|| summary_date(item.published_raw.as_deref()));
    let closing_date = detail
        .closing
        .or_else(|| summary_date(item.closing_raw.as_deref()));

    if title.is_empty() {
        return Err(SkipReason::MissingTitle);
    }
    if description.is_empty() {
        return Err(SkipReason::MissingDescription);
    }
    if let (Some(published), Some(closing)) = (published_date, closing_date) {
        if closing < published {
            return Err(SkipReason::DateOrdering { published, closing });
        }
    }

    // The detail page itself is always the first supporting document;
    // attachment links found on the page follow in first-seen order.
    let mut supporting_docs = vec![SupportingDoc::new("Tender Details", detail_url)];
    supporting_docs.extend(detail.docs.into_iter().filter(|d| d.url != detail_url));

    let email = fields::first_email(&full_notice_text).unwrap_or_default();

    Ok(NormalizedTender {
        base: TenderBase {
            title,
            description,
            source: config.source.clone(),
            published_date,
            closing_date,
            supporting_docs,
            tags: vec![],
        },
        tender_number: detail.tender_number.unwrap_or_default(),
        category: detail.category.unwrap_or_else(|| item.category.clone()),
        region: detail.region.unwrap_or_else(|| item.region.clone()),
        email,
        full_notice_text,
    })
}

fn summary_date(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(dates::parse_date)
}

fn skip(item: &RawSummaryItem, reason: SkipReason) -> FailureRecord {
    FailureRecord {
        title: item.title.clone(),
        detail_url: item.detail_url.clone(),
        reason,
    }
}
