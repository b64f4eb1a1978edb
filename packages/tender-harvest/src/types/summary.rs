//! Summary-list item parsing.
//!
//! The agency's list API returns each open tender as a positional row:
//! `[anchor_html, category, region, description, notice_text, closing_date]`,
//! where the anchor cell carries both the detail-page URL and the
//! item's human title. Rows that do not match this shape are unusable
//! and are skipped without ever invoking the detail fetcher.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use url::Url;

use crate::error::{HarvestResult, SkipReason};
use crate::extract::text;

/// One entry from the agency's summary-list endpoint.
///
/// Transient input to the record builder; consumed once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSummaryItem {
    /// Human title taken from the list row
    pub title: String,

    /// Absolute detail-page URL, when the row carried one
    pub detail_url: Option<String>,

    /// Short description from the list row
    pub description: String,

    /// Classification column from the list row
    pub category: String,

    /// Region column from the list row
    pub region: String,

    /// Notice text as published on the list row; often thinner than
    /// the detail page's version
    pub notice_text: String,

    /// Unparsed published date, when the row carried one
    pub published_raw: Option<String>,

    /// Unparsed closing date, when the row carried one
    pub closing_raw: Option<String>,
}

/// Decoded body of the summary-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct SummaryResponse {
    /// Positional tender rows, in publication order
    pub tenders: Vec<Value>,

    /// Total matching tenders on the server; more than `tenders.len()`
    /// means the page size was exceeded
    #[serde(default)]
    pub total_filtered: u64,
}

impl SummaryResponse {
    /// Whether the server holds more tenders than this page returned.
    pub fn is_truncated(&self) -> bool {
        (self.tenders.len() as u64) < self.total_filtered
    }
}

/// Decode the raw summary-list response body.
///
/// Logs a warning when the page holds fewer rows than the server's
/// total, so operators notice when pagination becomes necessary.
pub fn parse_summary_response(body: &str) -> HarvestResult<SummaryResponse> {
    let response: SummaryResponse = serde_json::from_str(body)?;
    if response.is_truncated() {
        warn!(
            returned = response.tenders.len(),
            total_filtered = response.total_filtered,
            "summary list returned fewer items than the server total; pagination may be needed"
        );
    }
    Ok(response)
}

impl RawSummaryItem {
    /// Parse one positional list row.
    ///
    /// Relative detail URLs are absolutized against `base_url`. Returns
    /// `SkipReason::UnusableRow` when the row is not an array of at
    /// least six strings.
    pub fn from_row(row: &Value, base_url: &str) -> Result<Self, SkipReason> {
        let cells = row.as_array().ok_or(SkipReason::UnusableRow)?;
        if cells.len() < 6 {
            return Err(SkipReason::UnusableRow);
        }

        let cell = |index: usize| -> Result<&str, SkipReason> {
            cells
                .get(index)
                .and_then(Value::as_str)
                .ok_or(SkipReason::UnusableRow)
        };

        let anchor = text::decode_entities(cell(0)?);
        let (detail_url, title) = split_anchor(&anchor, base_url);

        let description = strip_notice_prefix(&text::clean(cell(3)?));

        let closing_raw = Some(cell(5)?.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        // A seventh column, when the agency includes it, is the
        // published date.
        let published_raw = cells
            .get(6)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            title,
            detail_url,
            description,
            category: text::clean(cell(1)?),
            region: text::clean(cell(2)?),
            notice_text: text::clean(cell(4)?),
            published_raw,
            closing_raw,
        })
    }
}

/// Split the anchor cell into a detail URL and the anchor text.
///
/// Cells without an anchor yield the cleaned cell text and no URL.
fn split_anchor(anchor_html: &str, base_url: &str) -> (Option<String>, String) {
    let anchor_pattern =
        Regex::new(r#"(?is)href\s*=\s*["']([^"']+)["'][^>]*>\s*(.*?)\s*</a>"#).unwrap();

    match anchor_pattern.captures(anchor_html) {
        Some(cap) => {
            let href = cap.get(1).map(|m| m.as_str()).unwrap_or_default();
            let title = text::clean(cap.get(2).map(|m| m.as_str()).unwrap_or_default());
            (absolutize(href, base_url), title)
        }
        None => (None, text::clean(anchor_html)),
    }
}

/// Resolve a possibly-relative href against the agency base URL.
fn absolutize(href: &str, base_url: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return Some(href.to_string());
    }
    Url::parse(base_url)
        .and_then(|base| base.join(href))
        .map(|u| u.to_string())
        .ok()
}

/// Drop the boilerplate `Tender Notice:` prefix the agency prepends to
/// list-row descriptions.
fn strip_notice_prefix(description: &str) -> String {
    let prefix = Regex::new(r"(?i)^\s*Tender Notice:\s*").unwrap();
    prefix.replace(description, "").trim().to_string()
}
