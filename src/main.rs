use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use newsroll::{
    collect_recent, copy_assets, enrich_all, render, write_html, CacheStore, FetchConfig,
    HttpFetcher, SiteConfig,
};
use std::path::PathBuf;
use tracing::info;
use url::Url;

/// Build a static news page from configured RSS/Atom feeds.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the site config file
    #[arg(short, long, default_value = "newsroll.json")]
    config: PathBuf,

    /// Output directory for index.html and copied assets
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Local cache file path
    #[arg(long)]
    cache_path: Option<PathBuf>,

    /// Remote cache URL (takes precedence over the local path on load)
    #[arg(long)]
    cache_url: Option<Url>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let mut config = SiteConfig::load(&args.config)?;
    if let Some(out_dir) = args.out_dir {
        config.out_dir = out_dir;
    }
    if let Some(cache_path) = args.cache_path {
        config.cache_path = cache_path;
    }
    if let Some(cache_url) = args.cache_url {
        config.cache_url = Some(cache_url);
    }

    // One reference "now" for the whole run, so every article's age is
    // computed against the same instant.
    let build_time = Utc::now();
    info!("Starting build at {}", build_time.to_rfc3339());

    let store = CacheStore::new(&config.cache_path, config.cache_url.clone());
    let prior = store.load().await.context("restoring cache")?;

    let fetcher = HttpFetcher::new(FetchConfig::default())?;
    let enriched = enrich_all(&fetcher, &config.sources, &prior, build_time).await;

    store.save(&newsroll::Cache {
        sources: enriched.clone(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    })?;

    let articles = collect_recent(&enriched);
    let html = render(&articles);
    write_html(&config.out_dir, &html)?;
    copy_assets(&config.assets_dir, &config.out_dir)?;

    info!("Build finished: {} article(s) rendered", articles.len());
    Ok(())
}
