//! Parsing boundary between feed-rs and the rest of the system.
//!
//! Everything downstream only ever sees a validated [`Entry`].

use feed_rs::model::Entry as RawEntry;
use herald_common::error::FetchError;
use herald_common::types::Entry;

use crate::html::strip_tags;

/// Parse a feed document (RSS, Atom or JSON Feed) and return its newest entry.
///
/// Feeds list entries newest-first, so the first entry in document order wins.
pub fn parse_latest(raw: &[u8]) -> Result<Entry, FetchError> {
    // feed-rs would otherwise invent a title-based hash for items without a
    // guid; leave those ids empty so `derive_id` falls back to the link.
    let feed = feed_rs::parser::Builder::new()
        .id_generator(|_, _, _| String::new())
        .build()
        .parse(raw)
        .map_err(|e| FetchError::Parse(e.to_string()))?;

    let first = feed.entries.first().ok_or(FetchError::Empty)?;
    entry_from_raw(first).inspect_err(|e| {
        tracing::warn!(error = %e, raw_id = %first.id, "Rejected malformed feed entry");
    })
}

/// Validate a single feed-rs entry.
pub fn entry_from_raw(raw: &RawEntry) -> Result<Entry, FetchError> {
    let title = raw
        .title
        .as_ref()
        .map(|text| strip_tags(&text.content))
        .unwrap_or_default();
    let link = primary_link(raw);
    let published = raw.published.or(raw.updated);

    let id = derive_id(&raw.id, &link, &title, published.map(|p| p.to_rfc3339()))
        .ok_or_else(|| FetchError::Malformed("entry has no id, link or title".to_string()))?;

    let summary = raw
        .summary
        .as_ref()
        .map(|text| text.content.as_str())
        .filter(|s| !s.trim().is_empty())
        .or_else(|| raw.content.as_ref().and_then(|c| c.body.as_deref()))
        .map(strip_tags)
        .filter(|s| !s.is_empty());

    let author = raw
        .authors
        .iter()
        .map(|person| person.name.trim())
        .find(|name| !name.is_empty())
        .map(ToString::to_string);

    Ok(Entry {
        id,
        title,
        link,
        published,
        summary,
        author,
        images: collect_images(raw),
    })
}

/// Identifier preference: feed id/guid, then link, then title + published.
fn derive_id(
    raw_id: &str,
    link: &str,
    title: &str,
    published: Option<String>,
) -> Option<String> {
    let raw_id = raw_id.trim();
    if !raw_id.is_empty() {
        return Some(raw_id.to_string());
    }
    if !link.is_empty() {
        return Some(link.to_string());
    }
    let fallback = format!("{}{}", title.trim(), published.unwrap_or_default());
    (!fallback.is_empty()).then_some(fallback)
}

/// The `alternate` link if there is one, else the first link.
fn primary_link(raw: &RawEntry) -> String {
    raw.links
        .iter()
        .find(|link| link.rel.as_deref() == Some("alternate"))
        .or_else(|| {
            raw.links
                .iter()
                .find(|link| !matches!(link.rel.as_deref(), Some("enclosure") | Some("self")))
        })
        .map(|link| link.href.trim().to_string())
        .unwrap_or_default()
}

/// Image URLs from media objects, enclosures and image-typed links, deduplicated.
fn collect_images(raw: &RawEntry) -> Vec<String> {
    let mut images: Vec<String> = Vec::new();
    let mut push = |url: &str| {
        let url = url.trim();
        if !url.is_empty() && !images.iter().any(|seen| seen == url) {
            images.push(url.to_string());
        }
    };

    for media in &raw.media {
        for content in &media.content {
            let is_image = content
                .content_type
                .as_ref()
                .is_none_or(|mime| mime.essence().to_string().starts_with("image"));
            if is_image && let Some(url) = &content.url {
                push(url.as_str());
            }
        }
        for thumbnail in &media.thumbnails {
            push(&thumbnail.image.uri);
        }
    }

    for link in &raw.links {
        let is_enclosure = link.rel.as_deref() == Some("enclosure");
        let is_image = link
            .media_type
            .as_deref()
            .is_some_and(|ty| ty.starts_with("image"));
        if is_enclosure || is_image {
            push(&link.href);
        }
    }

    images
}
