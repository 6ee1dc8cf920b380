//! Cache-aside repository for one collection.

use std::marker::PhantomData;
use std::sync::Arc;

use futures_util::FutureExt;

use kennelsync_core::models::{filter_by_owner, Entity};
use kennelsync_core::remote::{RemoteError, RemoteSource};
use kennelsync_core::storage::{self, decode_entity, encode_entity, KeyValueStore};

use super::{RepositoryError, Result};
use crate::refresh::RefreshQueue;

/// Toggles for the two places where remote data may be written locally.
///
/// Both are off by default: cold reads and background refreshes return or
/// discard remote data without touching the local store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CachePolicy {
    /// Upsert the remote result of a cold read.
    pub write_back_cold_reads: bool,
    /// Upsert the remote result of a background refresh.
    pub persist_background_refresh: bool,
}

/// Local-first repository for entities of type `E`.
///
/// - **Reads**: local rows for the owner are returned immediately and a
///   refresh is queued. With no local rows the remote is awaited.
/// - **Writes**: remote create, then upsert locally.
pub struct CachedRepository<E: Entity> {
    store: Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteSource<E>>,
    refresh: RefreshQueue,
    policy: CachePolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> Clone for CachedRepository<E> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            remote: Arc::clone(&self.remote),
            refresh: self.refresh.clone(),
            policy: self.policy,
            _entity: PhantomData,
        }
    }
}

impl<E: Entity> CachedRepository<E> {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        remote: Arc<dyn RemoteSource<E>>,
        refresh: RefreshQueue,
        policy: CachePolicy,
    ) -> Self {
        Self {
            store,
            remote,
            refresh,
            policy,
            _entity: PhantomData,
        }
    }

    /// Returns every entity whose owner key matches.
    pub async fn read(&self, owner_key: &str) -> Result<Vec<E>> {
        let collection = E::COLLECTION;
        let cached = load_owned::<E>(self.store.as_ref(), owner_key).await?;

        if !cached.is_empty() {
            tracing::trace!(
                collection = %collection,
                owner_key = %owner_key,
                count = cached.len(),
                "Cache hit"
            );
            self.schedule_refresh(owner_key);
            return Ok(cached);
        }

        tracing::trace!(collection = %collection, owner_key = %owner_key, "Cache miss");
        let fetched = self
            .remote
            .fetch_by_owner(owner_key)
            .await
            .map_err(|source| RepositoryError::RemoteReadFailed { collection, source })?;

        if self.policy.write_back_cold_reads {
            mirror_all(self.store.as_ref(), &fetched).await;
        }

        Ok(fetched)
    }

    /// Creates an entity on the remote, then mirrors it locally.
    ///
    /// A failed mirror is logged and the created entity is still returned.
    pub async fn create(&self, draft: &E::Draft) -> Result<E> {
        let collection = E::COLLECTION;
        let entity = self
            .remote
            .create(draft)
            .await
            .map_err(|source| RepositoryError::RemoteWriteFailed { collection, source })?;

        if let Err(err) = mirror(self.store.as_ref(), &entity).await {
            tracing::warn!(
                collection = %collection,
                id = %entity.id(),
                error = %err,
                "Failed to mirror created entity"
            );
        }

        tracing::debug!(collection = %collection, id = %entity.id(), "Entity created");
        Ok(entity)
    }

    /// Local-only lookup by id.
    pub async fn cached(&self, id: &str) -> Result<Option<E>> {
        match self.store.get(E::COLLECTION, id).await? {
            Some(data) => Ok(Some(decode_entity(&data)?)),
            None => Ok(None),
        }
    }

    fn schedule_refresh(&self, owner_key: &str) {
        let remote = Arc::clone(&self.remote);
        let store = Arc::clone(&self.store);
        let persist = self.policy.persist_background_refresh;
        let owner = owner_key.to_string();

        let job = async move {
            let fetched = remote.fetch_by_owner(&owner).await?;
            if persist {
                mirror_all(store.as_ref(), &fetched).await;
            }
            Ok::<_, RemoteError>(fetched.len())
        }
        .boxed();

        self.refresh.submit(E::COLLECTION, owner_key, job);
    }
}

/// Decodes the whole collection and keeps rows for the owner.
///
/// Rows that fail to decode are skipped.
async fn load_owned<E: Entity>(store: &dyn KeyValueStore, owner_key: &str) -> Result<Vec<E>> {
    let rows = store.get_all(E::COLLECTION).await?;

    let mut entities = Vec::with_capacity(rows.len());
    for row in rows {
        match decode_entity::<E>(&row) {
            Ok(entity) => entities.push(entity),
            Err(err) => {
                tracing::warn!(
                    collection = %E::COLLECTION,
                    error = %err,
                    "Skipping unreadable row"
                );
            }
        }
    }

    Ok(filter_by_owner(entities, owner_key))
}

async fn mirror<E: Entity>(store: &dyn KeyValueStore, entity: &E) -> storage::Result<()> {
    let data = encode_entity(entity)?;
    store.upsert(E::COLLECTION, entity.id(), &data).await
}

async fn mirror_all<E: Entity>(store: &dyn KeyValueStore, entities: &[E]) {
    for entity in entities {
        if let Err(err) = mirror(store, entity).await {
            tracing::warn!(
                collection = %E::COLLECTION,
                id = %entity.id(),
                error = %err,
                "Failed to write remote entity locally"
            );
        }
    }
}
