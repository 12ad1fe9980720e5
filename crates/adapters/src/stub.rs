//! Stub event sink for dry runs and offline testing

use async_trait::async_trait;
use reddit_relay_domain::{EventSink, Post, SinkError};

/// Logs each event instead of delivering it; always succeeds
#[derive(Debug, Clone, Copy, Default)]
pub struct StubEventSink;

#[async_trait]
impl EventSink for StubEventSink {
    async fn send(&self, post: &Post) -> Result<(), SinkError> {
        tracing::info!(
            post_id = %post.id,
            author = %post.author,
            title = %post.title,
            "[DRY RUN] Would send event"
        );
        Ok(())
    }
}
