use crate::types::{BuildError, Result, Source};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use url::Url;

/// Site configuration: the ordered source list plus output locations.
///
/// Loaded from a JSON file; only `sources` is required. An example:
///
/// ```json
/// {
///   "sources": [
///     { "name": "BBC News", "href": "https://feeds.bbci.co.uk/news/rss.xml" }
///   ],
///   "cacheUrl": "https://news.example.com/cache.json"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    pub sources: Vec<Source>,
    #[serde(default)]
    pub cache_url: Option<Url>,
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("public/cache.json")
}

fn default_out_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| BuildError::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let config: SiteConfig =
            serde_json::from_str(&contents).map_err(|e| BuildError::Config {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        info!("Loaded {} source(s) from {}", config.sources.len(), path.display());
        Ok(config)
    }
}
