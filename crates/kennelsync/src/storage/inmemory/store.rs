//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use kennelsync_core::models::Collection;
use kennelsync_core::storage::{KeyValueStore, Result, StoreError, StoreState};

#[derive(Debug)]
struct Inner {
    state: StoreState,
    rows: HashMap<Collection, HashMap<String, String>>,
    settings: HashMap<String, String>,
}

impl Inner {
    fn ensure_open(&self) -> Result<()> {
        match StoreError::for_state(self.state) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// In-memory storage backend for testing.
///
/// Follows the same lifecycle rules as the SQLite store. Clones share data.
/// Nothing is persisted.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates a new unopened store.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                state: StoreState::Unopened,
                rows: HashMap::new(),
                settings: HashMap::new(),
            })),
        }
    }

    /// Creates a store that is already open.
    pub async fn opened() -> Self {
        let store = Self::new();
        store.inner.write().await.state = StoreState::Open;
        store
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn state(&self) -> StoreState {
        self.inner.read().await.state
    }

    async fn open(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.state {
            StoreState::Open => Ok(()),
            StoreState::Closed => Err(StoreError::Closed),
            StoreState::Unopened => {
                inner.state = StoreState::Open;
                Ok(())
            }
        }
    }

    async fn upsert(&self, collection: Collection, id: &str, data: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.ensure_open()?;
        inner
            .rows
            .entry(collection)
            .or_default()
            .insert(id.to_string(), data.to_string());
        Ok(())
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<String>> {
        let inner = self.inner.read().await;
        inner.ensure_open()?;
        Ok(inner
            .rows
            .get(&collection)
            .and_then(|rows| rows.get(id))
            .cloned())
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<String>> {
        let inner = self.inner.read().await;
        inner.ensure_open()?;
        Ok(inner
            .rows
            .get(&collection)
            .map(|rows| rows.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.ensure_open()?;
        inner.settings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let inner = self.inner.read().await;
        inner.ensure_open()?;
        Ok(inner.settings.get(key).cloned())
    }

    async fn close(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.state {
            StoreState::Closed => Err(StoreError::Closed),
            _ => {
                inner.state = StoreState::Closed;
                inner.rows.clear();
                inner.settings.clear();
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_calls_before_open_fail() {
        let store = MemoryStore::new();

        assert_eq!(
            store.upsert(Collection::Pets, "p1", "{}").await,
            Err(StoreError::NotInitialized)
        );
        assert_eq!(store.get_setting("k").await, Err(StoreError::NotInitialized));
    }

    #[tokio::test]
    async fn test_upsert_then_get_all() {
        let store = MemoryStore::opened().await;

        store.upsert(Collection::Pets, "p1", "\"a\"").await.unwrap();
        store.upsert(Collection::Pets, "p1", "\"b\"").await.unwrap();
        store.upsert(Collection::Pets, "p2", "\"c\"").await.unwrap();

        let mut rows = store.get_all(Collection::Pets).await.unwrap();
        rows.sort();
        assert_eq!(rows, vec!["\"b\"".to_string(), "\"c\"".to_string()]);
        assert!(store.get_all(Collection::Users).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_data() {
        let store = MemoryStore::opened().await;
        let clone = store.clone();

        store.set_setting("theme", "\"dark\"").await.unwrap();

        assert_eq!(
            clone.get_setting("theme").await.unwrap().as_deref(),
            Some("\"dark\"")
        );
    }

    #[tokio::test]
    async fn test_close_unopened_then_reopen_fails() {
        let store = MemoryStore::new();

        store.close().await.unwrap();

        assert_eq!(store.state().await, StoreState::Closed);
        assert_eq!(store.open().await, Err(StoreError::Closed));
        assert_eq!(store.close().await, Err(StoreError::Closed));
        assert_eq!(
            store.get(Collection::Kennels, "k1").await,
            Err(StoreError::Closed)
        );
    }
}
