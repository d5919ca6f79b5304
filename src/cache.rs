use crate::types::{BuildError, Cache, Result};
use reqwest::{Client, StatusCode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

/// Loads the prior run's snapshot and persists this run's snapshot.
///
/// The local path is an explicit constructor argument (no process-wide
/// constant); the default lives in the config layer. A remote URL, when
/// configured, takes precedence on load — build servers have no local
/// cache and restore the previous deploy's snapshot over HTTP instead.
pub struct CacheStore {
    path: PathBuf,
    remote_url: Option<Url>,
    client: Client,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>, remote_url: Option<Url>) -> Self {
        Self {
            path: path.into(),
            remote_url,
            client: Client::new(),
        }
    }

    /// Restore the prior cache.
    ///
    /// Remote: a 404 is the normal cold-start signal and yields the
    /// initial cache; any other HTTP failure or a malformed payload is a
    /// hard [`BuildError::CacheLoad`], because silently continuing with
    /// an empty cache on an ambiguous server error would drop all
    /// history on the next save. Local: absence or unreadable content is
    /// expected (first run, stale format) and yields the initial cache.
    pub async fn load(&self) -> Result<Cache> {
        let cache = match &self.remote_url {
            Some(url) => self.load_remote(url).await?,
            None => Self::load_local(&self.path),
        };

        info!("Cache restored with tool version {}", cache.tool_version);
        Ok(cache)
    }

    async fn load_remote(&self, url: &Url) -> Result<Cache> {
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            BuildError::CacheLoad {
                location: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!("Cache not found at {}, build continues with empty cache", url);
            return Ok(Cache::initial());
        }

        if !response.status().is_success() {
            return Err(BuildError::CacheLoad {
                location: url.to_string(),
                reason: format!("HTTP {}", response.status()),
            });
        }

        let cache = response.json::<Cache>().await.map_err(|e| BuildError::CacheLoad {
            location: url.to_string(),
            reason: format!("invalid cache payload: {}", e),
        })?;

        info!("Cache restored from {}", url);
        Ok(cache)
    }

    fn load_local(path: &Path) -> Cache {
        let Ok(contents) = fs::read_to_string(path) else {
            info!("No local cache at {}, using empty cache", path.display());
            return Cache::initial();
        };

        match serde_json::from_str(&contents) {
            Ok(cache) => {
                info!("Cache restored from {}", path.display());
                cache
            }
            Err(e) => {
                warn!("Unreadable local cache at {} ({}), using empty cache", path.display(), e);
                Cache::initial()
            }
        }
    }

    /// Persist the new snapshot to the local path. Never swallowed: a
    /// lost cache write breaks the next run's fallback behavior.
    pub fn save(&self, cache: &Cache) -> Result<()> {
        let body = serde_json::to_string_pretty(cache)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::CacheWrite {
                path: self.path.display().to_string(),
                source: e,
            })?;
        }

        fs::write(&self.path, body).map_err(|e| BuildError::CacheWrite {
            path: self.path.display().to_string(),
            source: e,
        })?;

        info!("Cache updated with tool version {}", cache.tool_version);
        Ok(())
    }
}
