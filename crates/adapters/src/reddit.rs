//! Reddit JSON listing adapter (primary feed source)
//!
//! Talks to the public `/r/<subreddit>.json` listing endpoint. Reddit
//! throttles anonymous server-side user agents aggressively, so the request
//! carries a fixed identification string.

use async_trait::async_trait;
use reddit_relay_domain::{FeedError, FeedSource, Post};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Public reddit.com listing endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.reddit.com";

/// Identification string sent as the User-Agent header
pub const DEFAULT_USER_AGENT: &str = "reddit-relay/0.1 (by /u/reddit-relay)";

/// Permalinks are relative; links are always anchored at the canonical host,
/// independent of which base URL served the listing.
const LINK_BASE: &str = "https://www.reddit.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Feed source backed by reddit.com's JSON listing
pub struct RedditFeedSource {
    client: Client,
    base_url: String,
    subreddit: String,
    limit: u32,
}

impl RedditFeedSource {
    pub fn new(subreddit: impl Into<String>, limit: u32, user_agent: &str) -> Self {
        Self::with_base_url(subreddit, limit, user_agent, DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(
        subreddit: impl Into<String>,
        limit: u32,
        user_agent: &str,
        base_url: String,
    ) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(user_agent)
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
struct Listing {
    data: ListingData,
}

#[derive(Deserialize)]
struct ListingData {
    children: Vec<Child>,
}

#[derive(Deserialize)]
struct Child {
    data: ChildData,
}

#[derive(Deserialize)]
struct ChildData {
    id: String,
    title: String,
    author: String,
    permalink: String,
}

#[async_trait]
impl FeedSource for RedditFeedSource {
    async fn fetch(&self) -> Result<Vec<Post>, FeedError> {
        let url = format!("{}/r/{}.json", self.base_url, self.subreddit);

        let response = self
            .client
            .get(&url)
            .query(&[("limit", self.limit.to_string())])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status().as_u16()));
        }

        let listing: Listing = response
            .json()
            .await
            .map_err(|e| FeedError::Malformed(e.to_string()))?;

        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| Post {
                link: format!("{}{}", LINK_BASE, child.data.permalink),
                id: child.data.id,
                title: child.data.title,
                author: child.data.author,
            })
            .collect();

        Ok(posts)
    }

    fn name(&self) -> &'static str {
        "reddit"
    }
}
