//! In-memory source of truth.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use kennelsync_core::models::{
    active_bookings_on, check_ins_on, filter_by_owner, search_kennels, Booking, Collection, Entity,
    Kennel,
};
use kennelsync_core::remote::{BoardingQueries, RemoteError, RemoteSource, Result};

/// Remote backend for testing and offline demos.
///
/// Holds every collection as JSON values in insertion order, assigns UUID v4
/// ids on create and answers the boarding queries with the same pure
/// functions the client-side code uses. Clones share data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRemote {
    collections: Arc<RwLock<HashMap<Collection, Vec<serde_json::Value>>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryRemote {
    /// Creates a new empty remote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an entity as-is, replacing any entity with the same id.
    pub async fn insert<E: Entity>(&self, entity: &E) -> Result<()> {
        let value =
            serde_json::to_value(entity).map_err(|e| RemoteError::InvalidResponse(e.to_string()))?;

        let mut collections = self.collections.write().await;
        let rows = collections.entry(E::COLLECTION).or_default();
        let id = entity.id();
        match rows
            .iter()
            .position(|row| row.get("id").and_then(|v| v.as_str()) == Some(id))
        {
            Some(index) => rows[index] = value,
            None => rows.push(value),
        }
        Ok(())
    }

    /// While offline every call fails with `RemoteError::Request`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<()> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(RemoteError::Request("Network unavailable".to_string()));
        }
        Ok(())
    }

    async fn all<E: Entity>(&self) -> Result<Vec<E>> {
        self.ensure_online()?;
        let collections = self.collections.read().await;
        collections
            .get(&E::COLLECTION)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| RemoteError::InvalidResponse(e.to_string()))
            })
            .collect()
    }
}

#[async_trait]
impl<E: Entity> RemoteSource<E> for InMemoryRemote {
    async fn fetch_by_owner(&self, owner_key: &str) -> Result<Vec<E>> {
        let entities = self.all::<E>().await?;
        Ok(filter_by_owner(entities, owner_key))
    }

    async fn create(&self, draft: &E::Draft) -> Result<E> {
        self.ensure_online()?;
        let entity = E::from_draft(Uuid::new_v4().to_string(), Utc::now(), draft.clone());
        self.insert(&entity).await?;

        tracing::debug!(collection = %E::COLLECTION, id = %entity.id(), "Remote entity created");
        Ok(entity)
    }
}

#[async_trait]
impl BoardingQueries for InMemoryRemote {
    async fn search_kennels(&self, query: &str) -> Result<Vec<Kennel>> {
        let kennels = self.all::<Kennel>().await?;
        Ok(search_kennels(&kennels, query).into_iter().cloned().collect())
    }

    async fn today_check_ins(&self, kennel_id: &str, date: NaiveDate) -> Result<Vec<Booking>> {
        let bookings = self.all::<Booking>().await?;
        Ok(check_ins_on(&bookings, kennel_id, date)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn active_bookings(&self, kennel_id: &str, date: NaiveDate) -> Result<Vec<Booking>> {
        let bookings = self.all::<Booking>().await?;
        Ok(active_bookings_on(&bookings, kennel_id, date)
            .into_iter()
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kennelsync_core::models::{BookingStatus, NewBooking, NewKennel, NewPet, Pet, Species};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_uuid_and_timestamps() {
        let remote = InMemoryRemote::new();

        let pet: Pet = remote
            .create(&NewPet::new("u1", "Rex", Species::Dog))
            .await
            .unwrap();

        assert!(Uuid::parse_str(&pet.id).is_ok());
        assert_eq!(pet.created_at, pet.updated_at);
        assert_eq!(pet.owner_id, "u1");
    }

    #[tokio::test]
    async fn test_fetch_by_owner_filters() {
        let remote = InMemoryRemote::new();
        let _: Pet = remote
            .create(&NewPet::new("u1", "Rex", Species::Dog))
            .await
            .unwrap();
        let _: Pet = remote
            .create(&NewPet::new("u2", "Tom", Species::Cat))
            .await
            .unwrap();

        let pets: Vec<Pet> = remote.fetch_by_owner("u1").await.unwrap();

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].name, "Rex");
    }

    #[tokio::test]
    async fn test_insert_replaces_same_id() {
        let remote = InMemoryRemote::new();
        let mut pet: Pet = remote
            .create(&NewPet::new("u1", "Rex", Species::Dog))
            .await
            .unwrap();

        pet.name = "Rexy".to_string();
        remote.insert(&pet).await.unwrap();

        let pets: Vec<Pet> = remote.fetch_by_owner("u1").await.unwrap();
        assert_eq!(pets, vec![pet]);
    }

    #[tokio::test]
    async fn test_offline_rejects_calls() {
        let remote = InMemoryRemote::new();
        remote.set_offline(true);

        let result: Result<Vec<Pet>> = remote.fetch_by_owner("u1").await;
        assert!(matches!(result, Err(RemoteError::Request(_))));

        remote.set_offline(false);
        let result: Result<Vec<Pet>> = remote.fetch_by_owner("u1").await;
        assert_eq!(result, Ok(Vec::new()));
    }

    #[tokio::test]
    async fn test_boarding_queries() {
        let remote = InMemoryRemote::new();
        let kennel: Kennel = remote
            .create(&NewKennel::new("op1", "Happy Paws", 10).with_city("Lyon"))
            .await
            .unwrap();
        let _: Kennel = remote
            .create(&NewKennel::new("op2", "Bark Inn", 4))
            .await
            .unwrap();

        let arriving: Booking = remote
            .create(
                &NewBooking::new("u1", &kennel.id, date(2024, 7, 1), date(2024, 7, 5))
                    .with_status(BookingStatus::Confirmed),
            )
            .await
            .unwrap();
        let staying: Booking = remote
            .create(
                &NewBooking::new("u2", &kennel.id, date(2024, 6, 28), date(2024, 7, 3))
                    .with_status(BookingStatus::CheckedIn),
            )
            .await
            .unwrap();

        let found = remote.search_kennels("lyon").await.unwrap();
        assert_eq!(found, vec![kennel.clone()]);

        let check_ins = remote
            .today_check_ins(&kennel.id, date(2024, 7, 1))
            .await
            .unwrap();
        assert_eq!(check_ins, vec![arriving.clone()]);

        let active = remote
            .active_bookings(&kennel.id, date(2024, 7, 1))
            .await
            .unwrap();
        assert_eq!(active, vec![staying, arriving]);
    }
}
