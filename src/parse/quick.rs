use std::sync::OnceLock;

use regex::Regex;

/// Result of parsing a quick-add line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuickInput {
    /// The remaining text after tag/url extraction, whitespace-collapsed
    pub content: String,
    /// `#tag` tokens in first-occurrence order, hash stripped
    pub labels: Vec<String>,
    /// `http(s)://` tokens in first-occurrence order
    pub urls: Vec<String>,
}

fn label_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#[\w-]+").expect("label regex"))
}

fn url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://[^\s,]+").expect("url regex"))
}

/// Split a quick-add line into content, labels, and urls.
///
/// Urls are pulled out first so a `#fragment` inside a link is not read as
/// a label. Empty input yields an empty `QuickInput`; callers reject empty
/// content before creating anything.
pub fn parse_quick(raw: &str) -> QuickInput {
    let mut urls = Vec::new();
    let without_urls = url_re().replace_all(raw, |caps: &regex::Captures| {
        urls.push(caps[0].to_string());
        ""
    });

    let mut labels = Vec::new();
    let without_labels = label_re().replace_all(&without_urls, |caps: &regex::Captures| {
        labels.push(caps[0][1..].to_string());
        ""
    });

    let content = without_labels.split_whitespace().collect::<Vec<_>>().join(" ");

    QuickInput {
        content,
        labels,
        urls,
    }
}
