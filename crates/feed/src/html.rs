//! Small HTML helpers built on `scraper`.

use scraper::{ElementRef, Html, Selector};

/// Strip markup from an HTML fragment and trim the result.
///
/// Entities are decoded; text nodes are concatenated as-is.
pub fn strip_tags(raw: &str) -> String {
    if !raw.contains('<') && !raw.contains('&') {
        return raw.trim().to_string();
    }
    let fragment = Html::parse_fragment(raw);
    fragment
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Pull a human-readable description out of an article page.
///
/// Preference order:
/// 1. `<meta property="og:description">`
/// 2. `<meta name="description">`
/// 3. first non-empty `<p>` inside the first `<article>`
/// 4. first non-empty `<p>` anywhere on the page
pub fn extract_description(page: &str) -> Option<String> {
    let document = Html::parse_document(page);

    if let Some(desc) = meta_content(&document, "property", "og:description") {
        return Some(desc);
    }
    if let Some(desc) = meta_content(&document, "name", "description") {
        return Some(desc);
    }

    let article_selector = Selector::parse("article").ok()?;
    let p_selector = Selector::parse("p").ok()?;

    if let Some(article) = document.select(&article_selector).next()
        && let Some(text) = first_paragraph(article, &p_selector)
    {
        return Some(text);
    }

    document
        .select(&p_selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

/// Attribute names and values are compared case-insensitively, empty content is skipped.
fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    let selector = Selector::parse("meta").ok()?;
    document
        .select(&selector)
        .filter(|meta| {
            meta.value()
                .attrs()
                .any(|(k, v)| k.eq_ignore_ascii_case(attr) && v.trim().eq_ignore_ascii_case(value))
        })
        .filter_map(|meta| meta.value().attr("content"))
        .map(|content| normalize_whitespace(&strip_tags(content)))
        .find(|content| !content.is_empty())
}

fn first_paragraph(scope: ElementRef<'_>, p_selector: &Selector) -> Option<String> {
    scope
        .select(p_selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
