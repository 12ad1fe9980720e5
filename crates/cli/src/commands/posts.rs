//! Posts command - display the cached front-page snapshot

use anyhow::{Context, Result};
use reddit_relay_adapters::state::SqliteStateStore;
use reddit_relay_domain::{StateStore, SystemClock, usecases::PostCache};
use std::path::PathBuf;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;

use crate::args::PostsArgs;
use crate::config::AppConfig;

pub async fn execute(args: PostsArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let store: Arc<dyn StateStore> = Arc::new(
        SqliteStateStore::new(&config.general.state_db_path)
            .await
            .context("Failed to open state store")?,
    );
    let cache = PostCache::new(store, Arc::new(SystemClock));

    let snapshot = cache.load_snapshot().await?;

    if args.json {
        let posts = snapshot.map(|s| s.posts).unwrap_or_default();
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    match snapshot {
        Some(snapshot) if !snapshot.posts.is_empty() => {
            let fetched_at = snapshot
                .fetched_at
                .format(&Rfc3339)
                .unwrap_or_else(|_| snapshot.fetched_at.to_string());
            println!(
                "{} cached posts (fetched at {}):",
                snapshot.posts.len(),
                fetched_at
            );
            println!();
            for post in &snapshot.posts {
                println!("  {} (by {})", post.title, post.author);
                println!("    {}", post.link);
            }
        }
        _ => {
            println!("No cached posts. Run 'reddit-relay run --once' to fetch.");
        }
    }

    Ok(())
}
