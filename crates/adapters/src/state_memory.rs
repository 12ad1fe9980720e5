//! In-memory state store for testing and offline mode

use async_trait::async_trait;
use reddit_relay_domain::{StateError, StateStore};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory key-value state store implementation
pub struct InMemoryStateStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StateError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StateError::Database(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StateError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StateError::Database(e.to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_missing_key_is_none() {
        let store = InMemoryStateStore::new();
        assert!(store.get("seen_ids").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let store = InMemoryStateStore::new();

        store.put("seen_ids", r#"["x1"]"#).await.unwrap();

        let value = store.get("seen_ids").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"["x1"]"#));
    }

    #[tokio::test]
    async fn put_overwrites_existing_value() {
        let store = InMemoryStateStore::new();

        store.put("current_posts", "[]").await.unwrap();
        store.put("current_posts", r#"[{"id":"x1"}]"#).await.unwrap();

        let value = store.get("current_posts").await.unwrap();
        assert_eq!(value.as_deref(), Some(r#"[{"id":"x1"}]"#));
    }
}
