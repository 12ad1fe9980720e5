//! Display cache for the latest front-page snapshot
//!
//! Independent of the seen set: this is what the dashboard renders, not a
//! processing cursor.

use std::sync::Arc;

use crate::model::{Post, Snapshot};
use crate::ports::{CURRENT_POSTS_KEY, Clock, StateError, StateStore};

/// Writer/reader for the current-posts snapshot
pub struct PostCache {
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
}

impl PostCache {
    pub fn new(store: Arc<dyn StateStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Overwrite the snapshot with the given posts, even when empty.
    ///
    /// Overwrite, not merge: the previous snapshot is gone after this call.
    pub async fn save(&self, posts: &[Post]) -> Result<(), StateError> {
        let snapshot = Snapshot {
            fetched_at: self.clock.now(),
            posts: posts.to_vec(),
        };

        let raw = serde_json::to_string(&snapshot)
            .map_err(|e| StateError::Serialization(e.to_string()))?;
        self.store.put(CURRENT_POSTS_KEY, &raw).await
    }

    /// The posts from the last saved snapshot, or empty if none exists
    pub async fn load(&self) -> Result<Vec<Post>, StateError> {
        Ok(self
            .load_snapshot()
            .await?
            .map(|s| s.posts)
            .unwrap_or_default())
    }

    /// The full last snapshot including its fetch time
    pub async fn load_snapshot(&self) -> Result<Option<Snapshot>, StateError> {
        match self.store.get(CURRENT_POSTS_KEY).await? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|e| StateError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::RwLock;
    use time::OffsetDateTime;

    struct MapStore {
        map: RwLock<HashMap<String, String>>,
    }

    impl MapStore {
        fn new() -> Self {
            Self {
                map: RwLock::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl StateStore for MapStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StateError> {
            Ok(self.map.read().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StateError> {
            self.map
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    struct FixedClock {
        time: OffsetDateTime,
    }

    impl Clock for FixedClock {
        fn now(&self) -> OffsetDateTime {
            self.time
        }
    }

    fn cache() -> PostCache {
        PostCache::new(
            Arc::new(MapStore::new()),
            Arc::new(FixedClock {
                time: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            }),
        )
    }

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Title {}", id),
            author: "someone".to_string(),
            link: format!("https://www.reddit.com/r/test/comments/{}/", id),
        }
    }

    #[tokio::test]
    async fn load_without_save_is_empty() {
        assert!(cache().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_then_load_round_trips_in_order() {
        let cache = cache();
        let posts = vec![post("a"), post("b"), post("c")];

        cache.save(&posts).await.unwrap();

        assert_eq!(cache.load().await.unwrap(), posts);
        let snapshot = cache.load_snapshot().await.unwrap().unwrap();
        assert_eq!(snapshot.fetched_at.unix_timestamp(), 1_700_000_000);
    }

    #[tokio::test]
    async fn saving_empty_blanks_the_snapshot() {
        let cache = cache();

        cache.save(&[post("a")]).await.unwrap();
        cache.save(&[]).await.unwrap();

        assert!(cache.load().await.unwrap().is_empty());
    }
}
