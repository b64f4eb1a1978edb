//! Date normalization.
//!
//! The agency publishes dates in several shapes: ISO-like, slashed
//! numeric, long-form locale text, and a `17 October 2025. 11H00`
//! house style. Parsing tries a prioritized format list; the first
//! success wins, and exhaustion yields `None` rather than a sentinel
//! timestamp. Values stay in the agency's local civil time.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;

/// Formats carrying a time of day, tried first.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%d/%m/%Y %H:%M",
    "%d %B %Y %H:%M",
];

/// Date-only formats; midnight is assumed.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%B %d, %Y",
    "%d %B %Y",
];

/// Parse one date-like string against the known formats.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let candidate = normalize_hour_marker(raw.trim());
    if candidate.is_empty() {
        return None;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(&candidate, format) {
            return Some(parsed);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(&candidate, format) {
            return Some(parsed.and_time(NaiveTime::MIN));
        }
    }
    None
}

/// Find the first parseable date embedded in prose.
pub fn find_date(prose: &str) -> Option<NaiveDateTime> {
    let candidate = Regex::new(
        r"(?x)
        \d{4}[-/]\d{1,2}[-/]\d{1,2}(?:[T\ ]\d{1,2}:\d{2}(?::\d{2})?)? # ISO-like
        | \d{1,2}/\d{1,2}/\d{4}(?:\ \d{1,2}:\d{2})?                  # slashed
        | [A-Z][a-z]+\ \d{1,2},\ \d{4}                               # October 10, 2025
        | \d{1,2}\ [A-Z][a-z]+\ \d{4}(?:\.?\ ?\d{1,2}[Hh]\d{2})?     # 17 October 2025. 11H00
        ",
    )
    .unwrap();

    let found = candidate
        .find_iter(prose)
        .find_map(|m| parse_date(m.as_str()));
    found
}

/// Rewrite the agency's `11H00` hour marker into `11:00` and drop the
/// period that precedes it.
fn normalize_hour_marker(raw: &str) -> String {
    let marker = Regex::new(r"(\d{1,2})[Hh](\d{2})").unwrap();
    if !marker.is_match(raw) {
        return raw.to_string();
    }

    let rewritten = marker.replace_all(raw, "$1:$2").replace('.', " ");
    rewritten.split_whitespace().collect::<Vec<_>>().join(" ")
}
