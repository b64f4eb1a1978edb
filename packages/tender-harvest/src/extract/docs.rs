//! Supporting-document extraction.
//!
//! Collects every attachment-like link on a detail page into
//! `{name, url}` pairs, de-duplicated by URL in first-seen order.

use indexmap::IndexMap;
use regex::Regex;
use url::Url;

use super::text;
use crate::types::tender::SupportingDoc;

/// File extensions treated as downloadable attachments.
const DOC_EXTENSIONS: &[&str] = &[
    ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".zip", ".rtf", ".csv",
];

/// Path markers for download endpoints that carry no extension.
const DOWNLOAD_MARKERS: &[&str] = &["/download", "/attachment", "/documents/"];

/// Collect attachment links from a detail page.
///
/// Relative hrefs are resolved against `page_url`; anchors, scripts,
/// and mail/tel links are skipped. Duplicate URLs keep their first
/// occurrence's name and position.
pub fn supporting_docs(html: &str, page_url: &str) -> Vec<SupportingDoc> {
    let anchor =
        Regex::new(r#"(?is)<a[^>]*href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#).unwrap();
    let base = Url::parse(page_url).ok();

    let mut docs: IndexMap<String, SupportingDoc> = IndexMap::new();

    for cap in anchor.captures_iter(html) {
        let href = text::decode_entities(cap.get(1).map(|m| m.as_str()).unwrap_or_default());
        let href = href.trim();

        if href.starts_with('#')
            || href.starts_with("javascript:")
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
        {
            continue;
        }

        let resolved = match resolve(href, base.as_ref()) {
            Some(url) => url,
            None => continue,
        };
        if !is_attachment(&resolved) {
            continue;
        }

        let name = doc_name(cap.get(2).map(|m| m.as_str()).unwrap_or_default(), &resolved);
        let url = resolved.to_string();
        docs.entry(url.clone())
            .or_insert_with(|| SupportingDoc::new(name, url));
    }

    docs.into_values().collect()
}

fn resolve(href: &str, base: Option<&Url>) -> Option<Url> {
    if let Ok(url) = Url::parse(href) {
        return Some(url);
    }
    base.and_then(|b| b.join(href).ok())
}

fn is_attachment(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    DOC_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || DOWNLOAD_MARKERS.iter().any(|marker| path.contains(marker))
}

/// Cleaned anchor text, falling back to the file name in the path.
fn doc_name(anchor_text: &str, url: &Url) -> String {
    let cleaned = text::clean(anchor_text);
    if !cleaned.is_empty() {
        return cleaned;
    }
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .unwrap_or("Document")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_URL: &str = "https://www.nra.co.za/tender/1001";

    #[test]
    fn collects_attachment_links_in_first_seen_order() {
        let html = r#"
            <a href="/docs/scope.pdf">Scope of Works</a>
            <a href="/docs/pricing.xlsx">Pricing Schedule</a>
            <a href="/tender/1002">Another tender</a>
            <a href="https://cdn.example.org/site-plan.zip">Site Plan</a>
        "#;

        let docs = supporting_docs(html, PAGE_URL);
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[0].name, "Scope of Works");
        assert_eq!(docs[0].url, "https://www.nra.co.za/docs/scope.pdf");
        assert_eq!(docs[1].url, "https://www.nra.co.za/docs/pricing.xlsx");
        assert_eq!(docs[2].url, "https://cdn.example.org/site-plan.zip");
    }

    #[test]
    fn deduplicates_by_url_keeping_first_name() {
        let html = r#"
            <a href="/docs/scope.pdf">Scope of Works</a>
            <a href="/docs/scope.pdf">Download again</a>
        "#;

        let docs = supporting_docs(html, PAGE_URL);
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].name, "Scope of Works");
    }

    #[test]
    fn download_endpoints_without_extension_count() {
        let html = r#"<a href="/documents/download?id=9"><img src="x.png"/></a>"#;

        let docs = supporting_docs(html, PAGE_URL);
        assert_eq!(docs.len(), 1);
        // Markup-only anchor text falls back to the path file name
        assert_eq!(docs[0].name, "download");
    }

    #[test]
    fn skips_mailto_anchors_and_scripts() {
        let html = r##"
            <a href="mailto:info@example.org">Mail</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">JS</a>
        "##;

        assert!(supporting_docs(html, PAGE_URL).is_empty());
    }

    #[test]
    fn unresolvable_relative_links_are_dropped() {
        let html = r#"<a href="/docs/scope.pdf">Scope</a>"#;
        assert!(supporting_docs(html, "not a url").is_empty());
    }
}
