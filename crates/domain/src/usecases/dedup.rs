//! Seen-set filter over the durable state store
//!
//! Ids are marked seen only after the corresponding event was delivered, so a
//! post whose send failed stays eligible for retry on the next cycle
//! (at-least-once delivery; a crash between send and mark can produce a rare
//! duplicate event).

use std::collections::HashSet;
use std::sync::Arc;

use crate::model::Post;
use crate::ports::{SEEN_IDS_KEY, StateError, StateStore};

/// Filters posts against the durable, monotonically-growing set of seen ids
pub struct DedupFilter {
    store: Arc<dyn StateStore>,
}

impl DedupFilter {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    async fn load_seen(&self) -> Result<HashSet<String>, StateError> {
        match self.store.get(SEEN_IDS_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StateError::Serialization(e.to_string()))
            }
            None => Ok(HashSet::new()),
        }
    }

    /// Return the posts whose id is not yet in the seen set, preserving the
    /// original relative order.
    ///
    /// Read-only: call [`DedupFilter::mark_seen`] once delivery succeeded.
    pub async fn filter_new(&self, posts: &[Post]) -> Result<Vec<Post>, StateError> {
        let seen = self.load_seen().await?;
        Ok(posts
            .iter()
            .filter(|p| !seen.contains(&p.id))
            .cloned()
            .collect())
    }

    /// Add the ids of the given posts to the seen set in a single write.
    ///
    /// Skips the write entirely when `posts` is empty. The set never shrinks;
    /// an id, once persisted, is never considered new again.
    pub async fn mark_seen(&self, posts: &[Post]) -> Result<(), StateError> {
        if posts.is_empty() {
            return Ok(());
        }

        let mut seen = self.load_seen().await?;
        seen.extend(posts.iter().map(|p| p.id.clone()));

        let raw =
            serde_json::to_string(&seen).map_err(|e| StateError::Serialization(e.to_string()))?;
        self.store.put(SEEN_IDS_KEY, &raw).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::RwLock;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingStore {
        map: RwLock<HashMap<String, String>>,
        writes: AtomicUsize,
    }

    impl CountingStore {
        fn new() -> Self {
            Self {
                map: RwLock::new(HashMap::new()),
                writes: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl StateStore for CountingStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StateError> {
            Ok(self.map.read().unwrap().get(key).cloned())
        }

        async fn put(&self, key: &str, value: &str) -> Result<(), StateError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.map
                .write()
                .unwrap()
                .insert(key.to_string(), value.to_string());
            Ok(())
        }
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
    async fn filter_returns_all_posts_when_nothing_seen() {
        let filter = DedupFilter::new(Arc::new(CountingStore::new()));
        let posts = vec![post("a"), post("b")];

        let new = filter.filter_new(&posts).await.unwrap();

        assert_eq!(new, posts);
    }

    #[tokio::test]
    async fn marked_ids_are_never_returned_again() {
        let filter = DedupFilter::new(Arc::new(CountingStore::new()));
        let posts = vec![post("a"), post("b"), post("c")];

        filter.mark_seen(&posts[..2].to_vec()).await.unwrap();
        let new = filter.filter_new(&posts).await.unwrap();

        assert_eq!(new, vec![post("c")]);

        // Reappearing in a later fetch changes nothing.
        let again = filter.filter_new(&posts[..2].to_vec()).await.unwrap();
        assert!(again.is_empty());
    }

    #[tokio::test]
    async fn filter_preserves_original_relative_order() {
        let filter = DedupFilter::new(Arc::new(CountingStore::new()));
        filter.mark_seen(&[post("b"), post("d")]).await.unwrap();

        let new = filter
            .filter_new(&[post("a"), post("b"), post("c"), post("d"), post("e")])
            .await
            .unwrap();

        let ids: Vec<&str> = new.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c", "e"]);
    }

    #[tokio::test]
    async fn mark_and_refilter_is_idempotent() {
        let filter = DedupFilter::new(Arc::new(CountingStore::new()));
        let posts = vec![post("a"), post("b")];

        let first = filter.filter_new(&posts).await.unwrap();
        assert_eq!(first, posts);
        filter.mark_seen(&first).await.unwrap();

        let second = filter.filter_new(&posts).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn marking_nothing_skips_the_write() {
        let store = Arc::new(CountingStore::new());
        let filter = DedupFilter::new(store.clone() as Arc<dyn StateStore>);

        filter.mark_seen(&[]).await.unwrap();
        assert_eq!(store.writes.load(Ordering::SeqCst), 0);

        filter.mark_seen(&[post("a")]).await.unwrap();
        assert_eq!(store.writes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn seen_set_grows_across_marks() {
        let store = Arc::new(CountingStore::new());
        let filter = DedupFilter::new(store.clone() as Arc<dyn StateStore>);

        filter.mark_seen(&[post("a")]).await.unwrap();
        filter.mark_seen(&[post("b")]).await.unwrap();

        let new = filter.filter_new(&[post("a"), post("b")]).await.unwrap();
        assert!(new.is_empty());
    }
}
