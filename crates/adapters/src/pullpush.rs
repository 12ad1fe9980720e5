//! PullPush archival search adapter (fallback feed source)
//!
//! PullPush mirrors Reddit submissions and stays reachable when reddit.com
//! rate-limits server traffic. Its search endpoint returns a flat `data`
//! array rather than Reddit's nested listing shape.

use async_trait::async_trait;
use reddit_relay_domain::{FeedError, FeedSource, Post};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Public PullPush API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.pullpush.io";

const LINK_BASE: &str = "https://www.reddit.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Feed source backed by PullPush's submission search
pub struct PullPushFeedSource {
    client: Client,
    base_url: String,
    subreddit: String,
    limit: u32,
}

impl PullPushFeedSource {
    pub fn new(subreddit: impl Into<String>, limit: u32) -> Self {
        Self::with_base_url(subreddit, limit, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(subreddit: impl Into<String>, limit: u32, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url,
            subreddit: subreddit.into(),
            limit,
        }
    }
}

#[derive(Deserialize)]
struct SearchResponse {
    data: Vec<Submission>,
}

#[derive(Deserialize)]
struct Submission {
    id: String,
    title: String,
    author: String,
    permalink: String,
}

#[async_trait]
impl FeedSource for PullPushFeedSource {
    async fn fetch(&self) -> Result<Vec<Post>, FeedError> {
        let url = format!("{}/reddit/search/submission/", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("subreddit", self.subreddit.as_str()),
                ("size", &self.limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let search: SearchResponse = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        let posts = search
            .data
            .into_iter()
            .map(|submission| Post {
                link: format!("{}{}", LINK_BASE, submission.permalink),
                id: submission.id,
                title: submission.title,
                author: submission.author,
            })
            .collect();

        Ok(posts)
    }

    fn name(&self) -> &'static str {
        "pullpush"
    }
}
