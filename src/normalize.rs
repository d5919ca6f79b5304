use crate::types::{Article, RawItem, Source};
use chrono::{DateTime, Utc};
use scraper::Html;
use tracing::warn;

/// Maximum length of a normalized description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1024;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Best-effort HTML-to-text. Parses the input as an HTML fragment and
/// concatenates its text nodes, so entities are decoded and malformed or
/// unclosed tags degrade to whatever text can be recovered. Never fails;
/// the worst case is an empty string.
pub fn plain_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    fragment.root_element().text().collect::<String>()
}

/// Age of `published` relative to `build_time`, rounded to whole days.
pub fn age_in_days(build_time: DateTime<Utc>, published: DateTime<Utc>) -> i64 {
    let millis = (build_time - published).num_milliseconds() as f64;
    (millis / MILLIS_PER_DAY).round() as i64
}

/// Convert one raw item into an [`Article`].
///
/// Returns `None` when the item has no publish date: without one the
/// article can't be filtered or sorted, so it is dropped here rather
/// than poisoning the stages downstream.
///
/// `build_time` is the single build-start timestamp, captured once per
/// run, so every article in a run computes its age against the same
/// reference point.
pub fn normalize_item(
    item: &RawItem,
    source: &Source,
    feed_title: Option<&str>,
    build_time: DateTime<Utc>,
) -> Option<Article> {
    let Some(published) = item.published else {
        warn!(
            "Dropping item without publish date from {}: {:?}",
            source.href,
            item.title.as_deref().unwrap_or("<untitled>")
        );
        return None;
    };

    let title = match item.title.as_deref() {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => "Untitled".to_string(),
    };

    let description = item
        .description
        .as_deref()
        .map(|d| {
            plain_text(d)
                .trim()
                .chars()
                .take(MAX_DESCRIPTION_CHARS)
                .collect::<String>()
        })
        .unwrap_or_default();

    Some(Article {
        source_href: source.href.clone(),
        source_title: feed_title.unwrap_or("").to_string(),
        title,
        description,
        link: item.link.clone().unwrap_or_default(),
        published_on: published,
        age_in_days: age_in_days(build_time, published),
    })
}
