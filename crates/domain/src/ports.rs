//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::Post;

/// Error type for feed source operations
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Unexpected status {0}")]
    Status(u16),
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Port for fetching the watched subreddit's front page from one provider
///
/// Each implementation pairs one provider's request construction with one
/// response-shape contract. A zero-length result set is a valid fetch, not
/// an error.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current front page, normalized into [`Post`]s
    async fn fetch(&self) -> Result<Vec<Post>, FeedError>;

    /// Short provider name used in fallback logging
    fn name(&self) -> &'static str;
}

/// Error type for event sink operations
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Sink returned {status}: {body}")]
    Status { status: u16, body: String },
}

/// Port for delivering one analytics event per post
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn send(&self, post: &Post) -> Result<(), SinkError>;
}

/// Error type for state store operations
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for the durable key-value state owned by the persistence layer
///
/// The pipeline addresses it through two fixed keys ([`SEEN_IDS_KEY`] and
/// [`CURRENT_POSTS_KEY`]); values are JSON documents. Puts are
/// last-writer-wins.
#[async_trait]
pub trait StateStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StateError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), StateError>;
}

/// Key addressing the set of already-forwarded post ids
pub const SEEN_IDS_KEY: &str = "seen_ids";

/// Key addressing the current front-page snapshot
pub const CURRENT_POSTS_KEY: &str = "current_posts";

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
