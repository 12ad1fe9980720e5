//! Fetch orchestrator - prioritized fallback chain over feed sources

use std::sync::Arc;

use crate::model::Post;
use crate::ports::FeedSource;

/// Tries feed sources in a fixed priority order, stopping at the first success.
///
/// Subreddit feed APIs are unreliable from server contexts, so a single
/// source of truth is not enough; the chain falls through to archival/search
/// providers when the primary fails.
pub struct FetchOrchestrator {
    sources: Vec<Arc<dyn FeedSource>>,
}

impl FetchOrchestrator {
    pub fn new(sources: Vec<Arc<dyn FeedSource>>) -> Self {
        Self { sources }
    }

    /// Fetch the front page from the first source that succeeds.
    ///
    /// Transport and parse failures are logged with the source name and the
    /// next source is tried. When every source fails the result is an empty
    /// list, never an error; a fully-failed cycle is a no-op for the caller.
    pub async fn fetch(&self) -> Vec<Post> {
        for source in &self.sources {
            match source.fetch().await {
                Ok(posts) => {
                    tracing::info!(
                        source = source.name(),
                        count = posts.len(),
                        "Fetched front page"
                    );
                    return posts;
                }
                Err(e) => {
                    tracing::warn!(
                        source = source.name(),
                        error = %e,
                        "Feed source failed, trying next"
                    );
                }
            }
        }

        tracing::warn!("All feed sources failed");
        Vec::new()
    }
}
