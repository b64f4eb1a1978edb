//! Plain-text extraction from raw markup.
//!
//! The agency's pages are server-rendered HTML with inline scripts and
//! styling; the cleaned text (tags stripped, entities decoded,
//! whitespace collapsed to single spaces) is the canonical notice-text
//! candidate.

use regex::Regex;

/// Strip markup from an HTML fragment and normalize whitespace.
///
/// Scripts and styles are removed wholesale, remaining tags become
/// single-space separators, entities are decoded, and runs of
/// whitespace collapse to one space.
pub fn clean(html: &str) -> String {
    let script_pattern = Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap();
    let style_pattern = Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap();
    let comment_pattern = Regex::new(r"(?s)<!--.*?-->").unwrap();
    let tag_pattern = Regex::new(r"(?s)<[^>]+>").unwrap();

    let text = script_pattern.replace_all(html, " ");
    let text = style_pattern.replace_all(&text, " ");
    let text = comment_pattern.replace_all(&text, " ");
    let text = tag_pattern.replace_all(&text, " ");

    collapse_whitespace(&decode_entities(&text))
}

/// Decode the HTML entities the agency's pages actually use.
pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Join text blocks with single spaces and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
