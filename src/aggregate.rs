use crate::types::{Article, EnrichedSource};
use tracing::info;

/// Articles older than this many days at build time are not rendered.
pub const RECENCY_WINDOW_DAYS: i64 = 14;

/// Flatten all enriched sources into one display-ready article list:
/// keep articles inside the recency window, then sort newest first.
///
/// The sort is stable, so articles with equal publish timestamps keep
/// their source-order relative position. RFC 3339 timestamps in UTC
/// compare the same way as their chronological instants, so comparing
/// `published_on` directly matches string comparison of the serialized
/// form.
pub fn collect_recent(enriched: &[EnrichedSource]) -> Vec<Article> {
    let mut articles: Vec<Article> = enriched
        .iter()
        .flat_map(|e| e.articles.iter())
        .filter(|a| a.age_in_days < RECENCY_WINDOW_DAYS)
        .cloned()
        .collect();

    articles.sort_by(|a, b| b.published_on.cmp(&a.published_on));

    info!("Collected {} recent articles for rendering", articles.len());
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FetchStatus, Source};
    use chrono::{DateTime, TimeZone, Utc};

    fn article(title: &str, published_on: DateTime<Utc>, age_in_days: i64) -> Article {
        Article {
            source_href: "https://example.com/feed".parse().unwrap(),
            source_title: "Example".to_string(),
            title: title.to_string(),
            description: String::new(),
            link: String::new(),
            published_on,
            age_in_days,
        }
    }

    fn enriched(articles: Vec<Article>) -> EnrichedSource {
        EnrichedSource {
            source: Source {
                name: "Example".to_string(),
                href: "https://example.com/feed".parse().unwrap(),
            },
            articles,
            fetched_at: Utc::now(),
            status: FetchStatus::Success,
        }
    }

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 8, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn filters_by_recency_window() {
        let sources = vec![enriched(vec![
            article("recent", ts(14), 1),
            article("boundary", ts(1), RECENCY_WINDOW_DAYS),
            article("ancient", ts(1), 90),
        ])];

        let out = collect_recent(&sources);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].title, "recent");
        assert!(out.iter().all(|a| a.age_in_days < RECENCY_WINDOW_DAYS));
    }

    #[test]
    fn sorts_newest_first_across_sources() {
        let sources = vec![
            enriched(vec![article("middle", ts(10), 5), article("oldest", ts(5), 10)]),
            enriched(vec![article("newest", ts(14), 1)]),
        ];

        let out = collect_recent(&sources);

        let titles: Vec<&str> = out.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["newest", "middle", "oldest"]);
        for pair in out.windows(2) {
            assert!(pair[0].published_on >= pair[1].published_on);
        }
    }

    #[test]
    fn equal_timestamps_keep_source_order() {
        let sources = vec![
            enriched(vec![article("first", ts(10), 5)]),
            enriched(vec![article("second", ts(10), 5)]),
        ];

        let out = collect_recent(&sources);

        assert_eq!(out[0].title, "first");
        assert_eq!(out[1].title, "second");
    }
}
