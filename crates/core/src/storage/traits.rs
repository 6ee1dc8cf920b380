use async_trait::async_trait;

use crate::models::Collection;

use super::{Result, StoreState};

/// Durable on-device storage of one JSON blob per `(collection, id)` and one
/// JSON value per settings key.
///
/// Data calls fail with `NotInitialized` before [`KeyValueStore::open`] and
/// with `Closed` after [`KeyValueStore::close`].
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Current lifecycle state.
    async fn state(&self) -> StoreState;

    /// Acquires the underlying handle. A no-op if already open.
    async fn open(&self) -> Result<()>;

    /// Inserts or replaces the row with the given id.
    async fn upsert(&self, collection: Collection, id: &str, data: &str) -> Result<()>;

    /// Gets a single row, `None` if absent.
    async fn get(&self, collection: Collection, id: &str) -> Result<Option<String>>;

    /// Gets every row in the collection, in no particular order.
    async fn get_all(&self, collection: Collection) -> Result<Vec<String>>;

    /// Inserts or replaces a setting.
    async fn set_setting(&self, key: &str, value: &str) -> Result<()>;

    /// Gets a setting, `None` if absent.
    async fn get_setting(&self, key: &str) -> Result<Option<String>>;

    /// Releases the handle.
    async fn close(&self) -> Result<()>;
}
