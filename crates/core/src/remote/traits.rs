use async_trait::async_trait;
use chrono::NaiveDate;

use crate::models::{Booking, Entity, Kennel};

use super::Result;

/// The authoritative store for one collection.
#[async_trait]
pub trait RemoteSource<E: Entity>: Send + Sync {
    /// Gets every entity whose owner key matches.
    async fn fetch_by_owner(&self, owner_key: &str) -> Result<Vec<E>>;

    /// Creates an entity. The source assigns `id`, `created_at` and `updated_at`.
    async fn create(&self, draft: &E::Draft) -> Result<E>;
}

/// Remote-only queries that are never served from the local cache.
#[async_trait]
pub trait BoardingQueries: Send + Sync {
    /// Kennels whose name or city matches the query.
    async fn search_kennels(&self, query: &str) -> Result<Vec<Kennel>>;

    /// Confirmed bookings arriving at a kennel on the given date.
    async fn today_check_ins(&self, kennel_id: &str, date: NaiveDate) -> Result<Vec<Booking>>;

    /// Bookings with pets on site at a kennel on the given date.
    async fn active_bookings(&self, kennel_id: &str, date: NaiveDate) -> Result<Vec<Booking>>;
}
