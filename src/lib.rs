pub mod aggregate;
pub mod assets;
pub mod cache;
pub mod config;
pub mod enrich;
pub mod fetcher;
pub mod normalize;
pub mod parser;
pub mod render;
pub mod types;

pub use aggregate::{collect_recent, RECENCY_WINDOW_DAYS};
pub use assets::copy_assets;
pub use cache::CacheStore;
pub use config::SiteConfig;
pub use enrich::{enrich_all, enrich_source};
pub use fetcher::{FetchConfig, FetchFeed, HttpFetcher};
pub use normalize::{normalize_item, plain_text, MAX_DESCRIPTION_CHARS};
pub use parser::parse_feed;
pub use render::{render, write_html};
pub use types::*;
