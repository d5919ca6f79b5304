use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

/// A configured feed endpoint. Read-only input for the whole run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    pub href: Url,
}

/// One entry as it comes out of the feed parser, before normalization.
/// Every field is optional; the normalizer decides defaults and drops.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

/// A parsed feed: optional title plus its items in document order.
#[derive(Debug, Clone, Default)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub items: Vec<RawItem>,
}

/// A normalized feed entry ready for display.
///
/// `published_on` is serialized as RFC 3339 in UTC, so the string form
/// sorts lexicographically in chronological order. `age_in_days` is a
/// snapshot taken against the single build-start timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub source_href: Url,
    pub source_title: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_on: DateTime<Utc>,
    pub age_in_days: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Success,
    Failure,
}

/// A source's latest fetch result, merged with cache fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedSource {
    pub source: Source,
    pub articles: Vec<Article>,
    pub fetched_at: DateTime<Utc>,
    pub status: FetchStatus,
}

/// The durable cross-run snapshot: exactly one entry per configured
/// source, in configured order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cache {
    pub sources: Vec<EnrichedSource>,
    pub tool_version: String,
}

impl Cache {
    /// The cold-start cache used when no prior snapshot exists.
    pub fn initial() -> Self {
        Self {
            sources: Vec::new(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Prior entry for a source, matched by href (the stable identity;
    /// names are free to change between runs).
    pub fn entry_for(&self, href: &Url) -> Option<&EnrichedSource> {
        self.sources.iter().find(|e| &e.source.href == href)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("failed to parse feed from {url}: {reason}")]
    Parse { url: String, reason: String },

    #[error("failed to load cache from {location}: {reason}")]
    CacheLoad { location: String, reason: String },

    #[error("failed to write {path}: {source}")]
    CacheWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load config from {path}: {reason}")]
    Config { path: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BuildError>;
