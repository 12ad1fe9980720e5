//! Run command - poll, dedup, and forward loop

use anyhow::{Context, Result, bail};
use reddit_relay_adapters::{
    amplitude::AmplitudeSink, pullpush::PullPushFeedSource, reddit::RedditFeedSource,
    state::SqliteStateStore, stub::StubEventSink,
};
use reddit_relay_domain::{
    EventSink, FeedSource, StateStore, SystemClock,
    usecases::{DedupFilter, FetchOrchestrator, PollCycle, PostCache},
};
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;

use crate::args::RunArgs;
use crate::config::AppConfig;

pub async fn execute(args: RunArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    tracing::info!(
        dry_run = args.dry_run,
        once = args.once,
        subreddit = %config.watch.subreddit,
        "Starting reddit-relay run"
    );

    // Build dependencies
    let store: Arc<dyn StateStore> = Arc::new(
        SqliteStateStore::new(&config.general.state_db_path)
            .await
            .context("Failed to initialize SQLite state store")?,
    );

    let fetcher = build_fetch_chain(&config);
    let sink = build_sink(&config, args.dry_run)?;

    let cycle = PollCycle::new(
        fetcher,
        DedupFilter::new(Arc::clone(&store)),
        PostCache::new(Arc::clone(&store), Arc::new(SystemClock)),
        sink,
    );

    // Execute
    if args.once {
        tracing::info!("Running single poll cycle");
        let report = cycle.run_once().await?;
        tracing::info!(
            fetched = report.fetched,
            new = report.new,
            sent = report.sent,
            "Poll cycle complete"
        );
    } else {
        // Continuous polling loop; each cycle runs to completion before the
        // next tick fires, so cycles never overlap.
        let poll_interval = Duration::from_secs(config.watch.poll_interval_secs);
        let mut ticker = interval(poll_interval);

        // Set up graceful shutdown
        let shutdown = async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to install Ctrl+C handler");
            tracing::info!("Shutdown signal received");
        };

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    match cycle.run_once().await {
                        Ok(report) => {
                            if report.fetched > 0 {
                                tracing::info!(
                                    fetched = report.fetched,
                                    new = report.new,
                                    sent = report.sent,
                                    "Poll cycle complete"
                                );
                            }
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "Poll cycle failed");
                        }
                    }
                }
                _ = &mut shutdown => {
                    tracing::info!("Shutting down gracefully");
                    break;
                }
            }
        }
    }

    tracing::info!("reddit-relay run completed");
    Ok(())
}

/// Priority-ordered fallback chain: reddit.com first, then PullPush
fn build_fetch_chain(config: &AppConfig) -> FetchOrchestrator {
    let mut sources: Vec<Arc<dyn FeedSource>> = vec![Arc::new(RedditFeedSource::with_base_url(
        config.watch.subreddit.clone(),
        config.watch.limit,
        &config.sources.user_agent,
        config.sources.reddit_base_url.clone(),
    ))];

    if config.sources.pullpush_enabled {
        sources.push(Arc::new(PullPushFeedSource::with_base_url(
            config.watch.subreddit.clone(),
            config.watch.limit,
            config.sources.pullpush_base_url.clone(),
        )));
    }

    FetchOrchestrator::new(sources)
}

fn build_sink(config: &AppConfig, dry_run: bool) -> Result<Arc<dyn EventSink>> {
    if dry_run {
        return Ok(Arc::new(StubEventSink));
    }

    let api_key = load_api_key(&config.amplitude.api_key_env)?;
    Ok(Arc::new(AmplitudeSink::with_endpoint(
        api_key,
        config.amplitude.endpoint.clone(),
    )))
}

/// A missing key is fatal: delivery cannot proceed, so fail fast instead of
/// retrying.
fn load_api_key(env_var: &str) -> Result<SecretString> {
    match std::env::var(env_var) {
        Ok(value) if !value.is_empty() => Ok(SecretString::new(value.into())),
        _ => bail!(
            "Missing Amplitude API key: set the {} environment variable",
            env_var
        ),
    }
}
