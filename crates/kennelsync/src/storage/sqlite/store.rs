//! SQLite key-value store implementation.
//!
//! Implements `KeyValueStore` from `kennelsync_core::storage` on a single
//! `tokio-rusqlite` connection. The connection's background thread runs one
//! call at a time, which is the only mutual exclusion this layer relies on.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio_rusqlite::Connection;

use kennelsync_core::models::Collection;
use kennelsync_core::storage::{KeyValueStore, Result, StoreError, StoreState};

use super::error::{map_open_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreLocation {
    File(PathBuf),
    /// Data is lost when the store is closed. Useful for testing.
    Memory,
}

enum Lifecycle {
    Unopened,
    Open(Connection),
    Closed,
}

impl Lifecycle {
    fn state(&self) -> StoreState {
        match self {
            Lifecycle::Unopened => StoreState::Unopened,
            Lifecycle::Open(_) => StoreState::Open,
            Lifecycle::Closed => StoreState::Closed,
        }
    }
}

/// SQLite-backed store.
///
/// Construct it unopened, then call [`KeyValueStore::open`] once at start-up.
pub struct SqliteStore {
    location: StoreLocation,
    lifecycle: RwLock<Lifecycle>,
}

impl SqliteStore {
    /// Creates an unopened store backed by a file.
    ///
    /// The file and its parent directories are created on open.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_location(StoreLocation::File(path.into()))
    }

    /// Creates an unopened store backed by an in-memory database.
    pub fn in_memory() -> Self {
        Self::with_location(StoreLocation::Memory)
    }

    fn with_location(location: StoreLocation) -> Self {
        Self {
            location,
            lifecycle: RwLock::new(Lifecycle::Unopened),
        }
    }

    /// Returns a handle to the open connection, or the lifecycle error.
    async fn connection(&self) -> Result<Connection> {
        match &*self.lifecycle.read().await {
            Lifecycle::Open(conn) => Ok(conn.clone()),
            other => Err(StoreError::for_state(other.state()).unwrap_or(StoreError::Closed)),
        }
    }

    async fn connect(&self) -> Result<Connection> {
        let conn = match &self.location {
            StoreLocation::File(path) => {
                ensure_parent_dir(path).await?;
                Connection::open(path.clone())
                    .await
                    .map_err(map_open_error)?
            }
            StoreLocation::Memory => Connection::open_in_memory()
                .await
                .map_err(map_open_error)?,
        };

        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            conn.execute_batch(schema::PROBE_WRITE).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_open_error)?;

        Ok(conn)
    }
}

async fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StoreError::StorageUnavailable(format!(
                    "Cannot create directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn state(&self) -> StoreState {
        self.lifecycle.read().await.state()
    }

    async fn open(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.write().await;
        match *lifecycle {
            Lifecycle::Open(_) => return Ok(()),
            Lifecycle::Closed => return Err(StoreError::Closed),
            Lifecycle::Unopened => {}
        }

        let conn = self.connect().await.inspect_err(|err| {
            tracing::error!(location = ?self.location, error = %err, "Failed to open local store");
        })?;
        *lifecycle = Lifecycle::Open(conn);

        tracing::info!(location = ?self.location, "Local store opened");
        Ok(())
    }

    async fn upsert(&self, collection: Collection, id: &str, data: &str) -> Result<()> {
        let conn = self.connection().await?;
        let sql = schema::upsert_row(collection);
        let id = id.to_string();
        let data = data.to_string();

        conn.call(move |conn| {
            conn.execute(&sql, rusqlite::params![id, data])
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    async fn get(&self, collection: Collection, id: &str) -> Result<Option<String>> {
        let conn = self.connection().await?;
        let sql = schema::select_row(collection);
        let id = id.to_string();

        conn.call(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
            match stmt.query_row([&id], |row| row.get::<_, String>(0)) {
                Ok(data) => Ok(Some(data)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(wrap_err(e)),
            }
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    async fn get_all(&self, collection: Collection) -> Result<Vec<String>> {
        let conn = self.connection().await?;
        let sql = schema::select_all_rows(collection);

        conn.call(move |conn| {
            let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
            let rows = stmt
                .query_map([], |row| row.get::<_, String>(0))
                .map_err(wrap_err)?;

            let mut blobs = Vec::new();
            for row_result in rows {
                blobs.push(row_result.map_err(wrap_err)?);
            }
            Ok(blobs)
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.connection().await?;
        let key = key.to_string();
        let value = value.to_string();

        conn.call(move |conn| {
            conn.execute(schema::UPSERT_SETTING, rusqlite::params![key, value])
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.connection().await?;
        let key = key.to_string();

        conn.call(move |conn| {
            let mut stmt = conn.prepare(schema::SELECT_SETTING).map_err(wrap_err)?;
            match stmt.query_row([&key], |row| row.get::<_, String>(0)) {
                Ok(value) => Ok(Some(value)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(wrap_err(e)),
            }
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }

    async fn close(&self) -> Result<()> {
        let mut lifecycle = self.lifecycle.write().await;
        match std::mem::replace(&mut *lifecycle, Lifecycle::Closed) {
            Lifecycle::Open(conn) => {
                conn.close().await.map_err(map_tokio_rusqlite_error)?;
                tracing::info!(location = ?self.location, "Local store closed");
                Ok(())
            }
            Lifecycle::Unopened => Ok(()),
            Lifecycle::Closed => Err(StoreError::Closed),
        }
    }
}
