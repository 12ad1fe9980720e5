//! Domain models and value objects

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A normalized post from the watched subreddit's front page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Provider-assigned post ID, stable across repeated fetches of the same item
    pub id: String,
    /// Post title
    pub title: String,
    /// Author username, used as the analytics actor identity
    pub author: String,
    /// Absolute URL to the post
    pub link: String,
}

/// The persisted display snapshot: the latest full fetch result
///
/// Fully overwritten each cycle; no history is retained.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the snapshot was fetched
    #[serde(with = "time::serde::rfc3339")]
    pub fetched_at: OffsetDateTime,
    /// Posts in the order the provider returned them
    pub posts: Vec<Post>,
}

/// Counts from one completed poll cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Posts returned by the fetch chain
    pub fetched: usize,
    /// Posts whose id was absent from the seen set
    pub new: usize,
    /// Events accepted by the sink
    pub sent: usize,
}
