//! Application context.
//!
//! Built once at start-up and passed explicitly to everything that needs
//! storage or the remote. There is no global instance.

use std::sync::Arc;

use kennelsync_client::KennelsyncClient;
use kennelsync_core::models::{
    Booking, Entity, Invoice, Kennel, KennelRun, MedicalRecord, Pet, StayUpdate, User, Vaccine,
};
use kennelsync_core::remote::{BoardingQueries, RemoteSource};
use kennelsync_core::storage::{KeyValueStore, Result, StoreState};

use crate::cached::{CachePolicy, CachedRepository};
use crate::config::Config;
use crate::refresh::{RefreshHandle, RefreshQueue};
use crate::settings::Settings;
use crate::storage::SqliteStore;

/// Everything a remote backend must serve to back a full [`AppContext`].
pub trait RemoteBackend:
    BoardingQueries
    + RemoteSource<User>
    + RemoteSource<Pet>
    + RemoteSource<Booking>
    + RemoteSource<MedicalRecord>
    + RemoteSource<Vaccine>
    + RemoteSource<Kennel>
    + RemoteSource<KennelRun>
    + RemoteSource<StayUpdate>
    + RemoteSource<Invoice>
{
}

impl<T> RemoteBackend for T where
    T: BoardingQueries
        + RemoteSource<User>
        + RemoteSource<Pet>
        + RemoteSource<Booking>
        + RemoteSource<MedicalRecord>
        + RemoteSource<Vaccine>
        + RemoteSource<Kennel>
        + RemoteSource<KennelRun>
        + RemoteSource<StayUpdate>
        + RemoteSource<Invoice>
{
}

fn repository<E: Entity>(
    store: &Arc<dyn KeyValueStore>,
    remote: Arc<dyn RemoteSource<E>>,
    refresh: &RefreshQueue,
    policy: CachePolicy,
) -> CachedRepository<E> {
    CachedRepository::new(Arc::clone(store), remote, refresh.clone(), policy)
}

/// Shared application context.
///
/// Holds one cache-aside repository per collection over a single store.
pub struct AppContext {
    pub store: Arc<dyn KeyValueStore>,
    pub users: CachedRepository<User>,
    pub pets: CachedRepository<Pet>,
    pub bookings: CachedRepository<Booking>,
    pub medical_records: CachedRepository<MedicalRecord>,
    pub vaccines: CachedRepository<Vaccine>,
    pub kennels: CachedRepository<Kennel>,
    pub kennel_runs: CachedRepository<KennelRun>,
    pub stay_updates: CachedRepository<StayUpdate>,
    pub invoices: CachedRepository<Invoice>,
    pub settings: Settings,
    /// Remote-only kennel queries.
    pub boarding: Arc<dyn BoardingQueries>,
    /// Background refresh queue shared by every repository.
    pub refresh: RefreshQueue,
    refresh_worker: RefreshHandle,
}

impl AppContext {
    /// Opens the SQLite store from the configuration and talks to the HTTP API.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::new(&config.db_path));
        let mut client = KennelsyncClient::new(&config.api_url);
        if let Some(token) = &config.api_token {
            client = client.with_token(token);
        }

        tracing::info!(
            profile = %config.profile,
            db_path = %config.db_path.display(),
            api_url = %config.api_url,
            "Starting kennelsync"
        );

        Self::build(
            store,
            Arc::new(client),
            config.refresh_queue_size,
            config.cache_policy,
        )
        .await
    }

    /// Opens `store` and wires every repository to `remote`.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn build<R>(
        store: Arc<dyn KeyValueStore>,
        remote: Arc<R>,
        refresh_queue_size: usize,
        policy: CachePolicy,
    ) -> Result<Self>
    where
        R: RemoteBackend + 'static,
    {
        store.open().await?;
        let (refresh, refresh_worker) = RefreshQueue::spawn(refresh_queue_size);

        Ok(Self {
            users: repository::<User>(&store, remote.clone(), &refresh, policy),
            pets: repository::<Pet>(&store, remote.clone(), &refresh, policy),
            bookings: repository::<Booking>(&store, remote.clone(), &refresh, policy),
            medical_records: repository::<MedicalRecord>(&store, remote.clone(), &refresh, policy),
            vaccines: repository::<Vaccine>(&store, remote.clone(), &refresh, policy),
            kennels: repository::<Kennel>(&store, remote.clone(), &refresh, policy),
            kennel_runs: repository::<KennelRun>(&store, remote.clone(), &refresh, policy),
            stay_updates: repository::<StayUpdate>(&store, remote.clone(), &refresh, policy),
            invoices: repository::<Invoice>(&store, remote.clone(), &refresh, policy),
            settings: Settings::new(Arc::clone(&store)),
            boarding: remote,
            refresh,
            refresh_worker,
            store,
        })
    }

    pub async fn store_state(&self) -> StoreState {
        self.store.state().await
    }

    /// Waits for queued and running refreshes, then closes the store.
    ///
    /// Refreshes submitted after this call are dropped.
    pub async fn shutdown(self) -> Result<()> {
        self.refresh_worker.shutdown().await;
        self.store.close().await?;
        tracing::info!("Shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;
    use kennelsync_core::models::{BookingStatus, NewBooking, NewKennel, NewPet, Species, Theme};
    use kennelsync_core::models::Collection;
    use kennelsync_core::storage::StoreError;

    use crate::cached::RepositoryError;
    use crate::refresh::RefreshOutcome;
    use crate::remote::InMemoryRemote;
    use crate::storage::MemoryStore;

    async fn context(remote: &InMemoryRemote) -> AppContext {
        AppContext::build(
            Arc::new(MemoryStore::new()),
            Arc::new(remote.clone()),
            8,
            CachePolicy::default(),
        )
        .await
        .expect("context should build")
    }

    #[tokio::test]
    async fn test_build_opens_store() {
        let ctx = context(&InMemoryRemote::new()).await;

        assert_eq!(ctx.store_state().await, StoreState::Open);
    }

    #[tokio::test]
    async fn test_created_pet_is_served_locally_when_offline() {
        let remote = InMemoryRemote::new();
        let ctx = context(&remote).await;

        let pet = ctx
            .pets
            .create(&NewPet::new("u1", "Rex", Species::Dog))
            .await
            .unwrap();
        remote.set_offline(true);

        let pets = ctx.pets.read("u1").await.unwrap();
        assert_eq!(pets, vec![pet]);
    }

    #[tokio::test]
    async fn test_offline_cold_read_fails() {
        let remote = InMemoryRemote::new();
        remote.set_offline(true);
        let ctx = context(&remote).await;

        let err = ctx.invoices.read("u1").await.unwrap_err();

        assert!(matches!(err, RepositoryError::RemoteReadFailed { .. }));
        assert_eq!(err.user_message(), "Network unavailable");
    }

    #[tokio::test]
    async fn test_boarding_queries_go_to_remote() {
        let remote = InMemoryRemote::new();
        let ctx = context(&remote).await;
        let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();

        let kennel = ctx
            .kennels
            .create(&NewKennel::new("op1", "Happy Paws", 12))
            .await
            .unwrap();
        let booking = ctx
            .bookings
            .create(
                &NewBooking::new("u1", &kennel.id, date, date.succ_opt().unwrap())
                    .with_status(BookingStatus::Confirmed),
            )
            .await
            .unwrap();

        let found = ctx.boarding.search_kennels("paws").await.unwrap();
        let arriving = ctx.boarding.today_check_ins(&kennel.id, date).await.unwrap();

        assert_eq!(found, vec![kennel]);
        assert_eq!(arriving, vec![booking]);
    }

    #[tokio::test]
    async fn test_settings_share_the_store() {
        let ctx = context(&InMemoryRemote::new()).await;

        let mut prefs = ctx.settings.load_preferences().await.unwrap();
        prefs.theme = Theme::Light;
        ctx.settings.save_preferences(&prefs).await.unwrap();

        let raw = ctx.store.get_setting("preferences").await.unwrap();
        assert!(raw.is_some_and(|value| value.contains("light")));
    }

    #[tokio::test]
    async fn test_shutdown_closes_store() {
        let ctx = context(&InMemoryRemote::new()).await;
        let store = Arc::clone(&ctx.store);

        ctx.shutdown().await.unwrap();

        assert_eq!(store.state().await, StoreState::Closed);
        assert_eq!(
            store.get_all(Collection::Pets).await,
            Err(StoreError::Closed)
        );
    }

    #[tokio::test]
    async fn test_shutdown_finishes_pending_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("kennelsync.db");
        let remote = InMemoryRemote::new();
        let ctx = AppContext::build(
            Arc::new(SqliteStore::new(&db_path)),
            Arc::new(remote.clone()),
            8,
            CachePolicy {
                persist_background_refresh: true,
                ..CachePolicy::default()
            },
        )
        .await
        .unwrap();
        let pet = ctx
            .pets
            .create(&NewPet::new("u1", "Rex", Species::Dog))
            .await
            .unwrap();
        let mut renamed = pet.clone();
        renamed.name = "Rex II".to_string();
        remote.insert(&renamed).await.unwrap();
        let mut events = ctx.refresh.subscribe();

        // Cache hit, so the remote copy only arrives through the refresh.
        assert_eq!(ctx.pets.read("u1").await.unwrap(), vec![pet.clone()]);
        ctx.shutdown().await.unwrap();

        let event = events.try_recv().unwrap();
        assert_eq!(event.outcome, RefreshOutcome::Completed { fetched: 1 });

        let reopened = SqliteStore::new(&db_path);
        reopened.open().await.unwrap();
        let row = reopened.get(Collection::Pets, &pet.id).await.unwrap();
        assert!(row.is_some_and(|data| data.contains("Rex II")));
    }

    #[tokio::test]
    async fn test_from_config_uses_sqlite_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            profile: "test".to_string(),
            db_path: dir.path().join("test").join("kennelsync.db"),
            // Nothing listens on port 1.
            api_url: "http://127.0.0.1:1".to_string(),
            api_token: None,
            refresh_queue_size: 4,
            cache_policy: CachePolicy::default(),
        };

        let ctx = AppContext::from_config(&config).await.unwrap();
        let err = ctx.pets.read("u1").await.unwrap_err();
        ctx.shutdown().await.unwrap();

        assert!(matches!(err, RepositoryError::RemoteReadFailed { .. }));
        assert!(config.db_path.exists());
    }
}
