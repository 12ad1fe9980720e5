//! Poll cycle use case - fetch, cache, dedup, forward

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::model::CycleReport;
use crate::ports::{EventSink, StateError};
use crate::usecases::{DedupFilter, FetchOrchestrator, PostCache};

/// Errors from the poll cycle
///
/// Only state persistence failures escalate; fetch and per-post delivery
/// failures are contained inside the cycle.
#[derive(Debug, thiserror::Error)]
pub enum CycleError {
    #[error("State error: {0}")]
    State(#[from] StateError),
}

/// One complete fetch → cache → filter → forward execution
pub struct PollCycle {
    fetcher: FetchOrchestrator,
    filter: DedupFilter,
    cache: PostCache,
    sink: Arc<dyn EventSink>,
    // Serializes overlapping invocations; the seen-set read-modify-write must
    // never interleave.
    cycle_lock: Mutex<()>,
}

impl PollCycle {
    pub fn new(
        fetcher: FetchOrchestrator,
        filter: DedupFilter,
        cache: PostCache,
        sink: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            fetcher,
            filter,
            cache,
            sink,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Run one poll cycle to completion.
    ///
    /// An empty fetch (all sources exhausted, or a genuinely empty page) ends
    /// the cycle early with a zero report, leaving the prior snapshot and the
    /// seen set untouched. Per-post send failures are logged with the post id
    /// and do not block the rest of the batch; only successfully-sent posts
    /// are marked seen, so failed ones stay eligible next cycle.
    pub async fn run_once(&self) -> Result<CycleReport, CycleError> {
        let _guard = self.cycle_lock.lock().await;

        let posts = self.fetcher.fetch().await;
        if posts.is_empty() {
            tracing::info!("No posts fetched, skipping cycle");
            return Ok(CycleReport::default());
        }

        self.cache.save(&posts).await?;

        let new_posts = self.filter.filter_new(&posts).await?;
        tracing::info!(
            fetched = posts.len(),
            new = new_posts.len(),
            "Filtered front page"
        );

        let mut delivered = Vec::new();
        for post in &new_posts {
            match self.sink.send(post).await {
                Ok(()) => delivered.push(post.clone()),
                Err(e) => {
                    tracing::error!(post_id = %post.id, error = %e, "Failed to send event");
                }
            }
        }

        self.filter.mark_seen(&delivered).await?;

        let report = CycleReport {
            fetched: posts.len(),
            new: new_posts.len(),
            sent: delivered.len(),
        };
        tracing::info!(
            sent = report.sent,
            attempted = report.new,
            "Cycle complete"
        );
        Ok(report)
    }
}
