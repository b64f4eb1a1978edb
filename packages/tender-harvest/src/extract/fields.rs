//! Single-field extractors over raw detail-page markup.
//!
//! Each extractor is a pure function: `(document) -> Some(value)` or
//! `None` when the structural marker is absent. Fields are located by
//! labeled rows and named sections rather than positional offsets,
//! because the agency does not guarantee section order. An extractor
//! never guesses: a missing marker is an extraction gap, not an error.

use regex::Regex;

use super::text;

/// Value of the cell following a labeled `<th>`/`<td>` cell.
///
/// Matches both `<td>Label:</td><td>value</td>` and
/// `<th>Label</th><td>value</td>`; the trailing colon on the label is
/// optional.
pub fn labeled_value(html: &str, label: &str) -> Option<String> {
    let pattern = format!(
        r"(?is)<t[hd][^>]*>\s*{}\s*:?\s*</t[hd]>\s*<td[^>]*>(.*?)</td>",
        regex::escape(label)
    );
    let row = Regex::new(&pattern).unwrap();

    row.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| text::clean(m.as_str()))
        .filter(|value| !value.is_empty())
}

/// Page title from the `<h2>` inside the page-header section.
pub fn page_title(html: &str) -> Option<String> {
    let header = Regex::new(
        r#"(?is)<div[^>]*class="[^"]*page-header[^"]*"[^>]*>.*?<h2[^>]*>(.*?)</h2>"#,
    )
    .unwrap();

    header
        .captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| text::clean(m.as_str()))
        .filter(|title| !title.is_empty())
}

/// Description from the first `<h3>` on the page.
pub fn first_heading(html: &str) -> Option<String> {
    let h3 = Regex::new(r"(?is)<h3[^>]*>(.*?)</h3>").unwrap();

    h3.captures(html)
        .and_then(|cap| cap.get(1))
        .map(|m| text::clean(m.as_str()))
        .filter(|heading| !heading.is_empty())
}

/// Agency-issued tender number from its labeled row, normalized to
/// uppercase with collapsed whitespace.
pub fn tender_number(html: &str) -> Option<String> {
    labeled_value(html, "Tender Number").map(|value| value.to_uppercase())
}

/// Classification from its labeled row.
pub fn category(html: &str) -> Option<String> {
    labeled_value(html, "Category")
}

/// Region from its labeled row.
pub fn region(html: &str) -> Option<String> {
    labeled_value(html, "Region")
}

/// Full notice text from the cell following the `Tender Notice:` label.
pub fn notice_text(html: &str) -> Option<String> {
    labeled_value(html, "Tender Notice")
}

/// First email address in cleaned notice text, lowercased.
///
/// Returns `None` when no address matches; never fabricates a
/// placeholder.
pub fn first_email(notice: &str) -> Option<String> {
    let email = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").unwrap();

    email
        .find(notice)
        .map(|m| m.as_str().to_lowercase())
}
