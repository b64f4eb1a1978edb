//! Normalized tender record types.
//!
//! `TenderBase` is the record shape shared by every agency pipeline;
//! an agency-specific record layers its extra fields on top via
//! composition (`serde(flatten)`), so no runtime polymorphism is
//! needed. Timestamps are `NaiveDateTime` in the agency's local civil
//! time; they are never shifted to UTC.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A downloadable document attached to a tender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingDoc {
    /// Human-readable document name
    pub name: String,

    /// Absolute URL of the document
    pub url: String,
}

impl SupportingDoc {
    /// Create a new supporting document reference.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Fields common to every agency's tender record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenderBase {
    /// Project title (non-empty on every emitted record)
    pub title: String,

    /// Project description (non-empty on every emitted record)
    pub description: String,

    /// Constant identifying the publishing agency
    pub source: String,

    /// When the notice was published, if known
    pub published_date: Option<NaiveDateTime>,

    /// Submission deadline, if known; never before `published_date`
    /// on an emitted record
    pub closing_date: Option<NaiveDateTime>,

    /// Attachment references in first-seen order; may be empty
    #[serde(default)]
    pub supporting_docs: Vec<SupportingDoc>,

    /// Always empty at emission; populated downstream
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One normalized road-agency tender, ready for batching.
///
/// Created exactly once per summary item that survives validation and
/// never mutated afterwards. Every field is present on the wire even
/// when empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTender {
    /// Shared base fields
    #[serde(flatten)]
    pub base: TenderBase,

    /// Agency-issued identifier; empty when not recoverable
    pub tender_number: String,

    /// Free-text classification; may be empty
    pub category: String,

    /// Free-text region; may be empty
    pub region: String,

    /// Contact address found in the notice text; empty when none
    pub email: String,

    /// Cleaned plain text of the full notice; may be empty
    pub full_notice_text: String,
}

impl NormalizedTender {
    /// Serialize to the flat JSON shape delivered to the queue.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
