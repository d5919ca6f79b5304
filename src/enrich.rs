use crate::fetcher::FetchFeed;
use crate::normalize::normalize_item;
use crate::parser::parse_feed;
use crate::types::{Article, Cache, EnrichedSource, FetchStatus, Result, Source};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{info, warn};

/// Merge one source's fetch outcome with its prior cache entry.
///
/// Success keeps the fresh article list. Failure carries the prior
/// entry's articles forward unchanged (matched by source href), or an
/// empty list when the source has never been fetched successfully.
pub fn enrich_source(
    source: &Source,
    fetch_result: Result<Vec<Article>>,
    cache: &Cache,
    fetched_at: DateTime<Utc>,
) -> EnrichedSource {
    match fetch_result {
        Ok(articles) => {
            info!("Enriched {} with {} fresh articles", source.name, articles.len());
            EnrichedSource {
                source: source.clone(),
                articles,
                fetched_at,
                status: FetchStatus::Success,
            }
        }
        Err(e) => {
            let articles = match cache.entry_for(&source.href) {
                Some(prior) => {
                    warn!(
                        "{}: {} - falling back to {} cached articles",
                        source.name,
                        e,
                        prior.articles.len()
                    );
                    prior.articles.clone()
                }
                None => {
                    warn!("{}: {} - no prior cache entry, continuing empty", source.name, e);
                    Vec::new()
                }
            };
            EnrichedSource {
                source: source.clone(),
                articles,
                fetched_at,
                status: FetchStatus::Failure,
            }
        }
    }
}

async fn fetch_articles(
    fetcher: &dyn FetchFeed,
    source: &Source,
    build_time: DateTime<Utc>,
) -> Result<Vec<Article>> {
    let body = fetcher.fetch(&source.href).await?;
    let feed = parse_feed(source.href.as_str(), &body)?;

    Ok(feed
        .items
        .iter()
        .filter_map(|item| normalize_item(item, source, feed.title.as_deref(), build_time))
        .collect())
}

/// Fetch, parse, and normalize all sources concurrently, merging each
/// with its prior cache entry.
///
/// The fan-out is unbounded (one in-flight request per source) and the
/// result order is the configured source order, not completion order.
/// A failure on one source never blocks or aborts another's processing.
pub async fn enrich_all(
    fetcher: &dyn FetchFeed,
    sources: &[Source],
    cache: &Cache,
    build_time: DateTime<Utc>,
) -> Vec<EnrichedSource> {
    info!("Fetching {} sources", sources.len());

    let fetches = sources
        .iter()
        .map(|source| fetch_articles(fetcher, source, build_time));
    let results = join_all(fetches).await;

    sources
        .iter()
        .zip(results)
        .map(|(source, result)| enrich_source(source, result, cache, Utc::now()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuildError;
    use chrono::TimeZone;

    fn source(href: &str) -> Source {
        Source {
            name: "Example".to_string(),
            href: href.parse().unwrap(),
        }
    }

    fn article(source_href: &str, title: &str) -> Article {
        Article {
            source_href: source_href.parse().unwrap(),
            source_title: "Example".to_string(),
            title: title.to_string(),
            description: String::new(),
            link: String::new(),
            published_on: Utc.with_ymd_and_hms(2025, 8, 12, 0, 0, 0).unwrap(),
            age_in_days: 3,
        }
    }

    fn fetch_error() -> BuildError {
        BuildError::Fetch {
            url: "https://example.com/feed".to_string(),
            reason: "HTTP 500".to_string(),
        }
    }

    #[test]
    fn success_uses_fresh_articles() {
        let src = source("https://example.com/feed");
        let fresh = vec![article("https://example.com/feed", "new")];

        let enriched = enrich_source(&src, Ok(fresh.clone()), &Cache::initial(), Utc::now());

        assert_eq!(enriched.status, FetchStatus::Success);
        assert_eq!(enriched.articles, fresh);
    }

    #[test]
    fn failure_falls_back_to_prior_entry() {
        let src = source("https://example.com/feed");
        let prior_articles = vec![article("https://example.com/feed", "old")];
        let cache = Cache {
            sources: vec![EnrichedSource {
                source: src.clone(),
                articles: prior_articles.clone(),
                fetched_at: Utc::now(),
                status: FetchStatus::Success,
            }],
            tool_version: "0.0.1".to_string(),
        };

        let enriched = enrich_source(&src, Err(fetch_error()), &cache, Utc::now());

        assert_eq!(enriched.status, FetchStatus::Failure);
        assert_eq!(enriched.articles, prior_articles);
    }

    #[test]
    fn failure_without_prior_entry_is_empty() {
        let src = source("https://example.com/feed");

        let enriched = enrich_source(&src, Err(fetch_error()), &Cache::initial(), Utc::now());

        assert_eq!(enriched.status, FetchStatus::Failure);
        assert!(enriched.articles.is_empty());
    }

    #[test]
    fn prior_entry_matches_by_href_not_name() {
        let cached = Source {
            name: "Old Name".to_string(),
            href: "https://example.com/feed".parse().unwrap(),
        };
        let cache = Cache {
            sources: vec![EnrichedSource {
                source: cached,
                articles: vec![article("https://example.com/feed", "old")],
                fetched_at: Utc::now(),
                status: FetchStatus::Success,
            }],
            tool_version: "0.0.1".to_string(),
        };

        let renamed = Source {
            name: "New Name".to_string(),
            href: "https://example.com/feed".parse().unwrap(),
        };
        let enriched = enrich_source(&renamed, Err(fetch_error()), &cache, Utc::now());

        assert_eq!(enriched.articles.len(), 1);
    }
}
