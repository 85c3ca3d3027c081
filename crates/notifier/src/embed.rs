//! Discord webhook payload types and formatting.

use chrono::SecondsFormat;
use serde::Serialize;

use herald_common::types::Entry;

/// Embed accent color (a neutral blue).
pub const EMBED_COLOR: u32 = 4_886_754;

/// Discord caps embed descriptions at 4096; we stay well under.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// Discord limit for embed titles.
pub const MAX_TITLE_CHARS: usize = 256;

/// Images beyond the first are sent as extra image-only embeds, up to this many.
pub const MAX_EXTRA_IMAGES: usize = 3;

pub const NO_DESCRIPTION: &str = "(No description available)";
pub const DEFAULT_TITLE: &str = "New feed entry";

/// Body of a webhook POST.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebhookMessage {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Embed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    /// ISO-8601
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<EmbedFooter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<EmbedAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<EmbedImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedImage {
    pub url: String,
}

/// Format an entry and its resolved description into a webhook message.
pub fn build_message(entry: &Entry, description: &str, footer: &str) -> WebhookMessage {
    let title = entry.title.trim();
    let title = if title.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        truncate_chars(title, MAX_TITLE_CHARS)
    };

    let description = description.trim();
    let description = if description.is_empty() {
        NO_DESCRIPTION.to_string()
    } else {
        truncate_at_word(description, MAX_DESCRIPTION_CHARS)
    };

    let link = entry.link.trim();

    let main = Embed {
        title: Some(title),
        url: (!link.is_empty()).then(|| link.to_string()),
        description: Some(description),
        color: Some(EMBED_COLOR),
        timestamp: entry
            .published
            .map(|p| p.to_rfc3339_opts(SecondsFormat::Secs, true)),
        footer: Some(EmbedFooter {
            text: footer.to_string(),
        }),
        author: entry.author.as_ref().map(|name| EmbedAuthor { name: name.clone() }),
        image: entry.images.first().map(|url| EmbedImage { url: url.clone() }),
    };

    let extras = entry
        .images
        .iter()
        .skip(1)
        .take(MAX_EXTRA_IMAGES)
        .map(|url| Embed {
            image: Some(EmbedImage { url: url.clone() }),
            ..Embed::default()
        });

    WebhookMessage {
        embeds: std::iter::once(main).chain(extras).collect(),
    }
}

/// Cut `text` to at most `max` characters, ending on a word boundary with `...`.
///
/// Text already within the limit is returned unchanged.
pub fn truncate_at_word(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    let cut = match head.rsplit_once(' ') {
        Some((before, _)) if !before.trim().is_empty() => before.trim_end(),
        _ => head.as_str(),
    };
    format!("{cut}...")
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let head: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{head}...")
}
