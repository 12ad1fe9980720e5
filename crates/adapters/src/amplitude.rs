//! Amplitude HTTP V2 event sink
//!
//! One upload per post: a single `reddit_post_ingested` event with the post's
//! author as the user identity and title/link/author as event properties.

use async_trait::async_trait;
use reddit_relay_domain::{EventSink, Post, SinkError};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use std::time::Duration;

/// Amplitude HTTP V2 upload endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api2.amplitude.com/2/httpapi";

/// Event type constant for forwarded posts
pub const EVENT_TYPE: &str = "reddit_post_ingested";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Event sink backed by Amplitude's HTTP API
pub struct AmplitudeSink {
    client: Client,
    api_key: SecretString,
    endpoint: String,
}

impl AmplitudeSink {
    pub fn new(api_key: SecretString) -> Self {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(api_key: SecretString, endpoint: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            endpoint,
        }
    }
}

#[derive(Serialize)]
struct UploadRequest<'a> {
    api_key: &'a str,
    events: [Event<'a>; 1],
}

#[derive(Serialize)]
struct Event<'a> {
    event_type: &'static str,
    user_id: &'a str,
    event_properties: EventProperties<'a>,
}

#[derive(Serialize)]
struct EventProperties<'a> {
    title: &'a str,
    link: &'a str,
    author: &'a str,
}

#[async_trait]
impl EventSink for AmplitudeSink {
    async fn send(&self, post: &Post) -> Result<(), SinkError> {
        let request = UploadRequest {
            api_key: self.api_key.expose_secret(),
            events: [Event {
                event_type: EVENT_TYPE,
                user_id: &post.author,
                event_properties: EventProperties {
                    title: &post.title,
                    link: &post.link,
                    author: &post.author,
                },
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| SinkError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(post_id = %post.id, "Event accepted by Amplitude");
        Ok(())
    }
}
