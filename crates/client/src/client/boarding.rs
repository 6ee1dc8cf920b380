//! Kennel operations served by the API only.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Method;

use kennelsync_core::models::{Booking, Kennel};
use kennelsync_core::remote::{self, BoardingQueries, RemoteError};

use super::KennelsyncClient;
use crate::error::Result;

impl KennelsyncClient {
    /// Search kennels by name or city.
    pub async fn search_kennels(&self, query: &str) -> Result<Vec<Kennel>> {
        let response = self
            .request(Method::GET, "/api/kennels/search")
            .query(&[("q", query)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Confirmed bookings arriving at a kennel on a date.
    pub async fn check_ins(&self, kennel_id: &str, date: NaiveDate) -> Result<Vec<Booking>> {
        let url = self.segment_url("/api/kennels", &[kennel_id, "check-ins"])?;
        let response = self
            .request_url(Method::GET, url)
            .query(&[("date", date.to_string())])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Bookings with pets on site at a kennel on a date.
    pub async fn active_bookings(&self, kennel_id: &str, date: NaiveDate) -> Result<Vec<Booking>> {
        let url = self.segment_url("/api/kennels", &[kennel_id, "bookings", "active"])?;
        let response = self
            .request_url(Method::GET, url)
            .query(&[("date", date.to_string())])
            .send()
            .await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl BoardingQueries for KennelsyncClient {
    async fn search_kennels(&self, query: &str) -> remote::Result<Vec<Kennel>> {
        KennelsyncClient::search_kennels(self, query)
            .await
            .map_err(RemoteError::from)
    }

    async fn today_check_ins(
        &self,
        kennel_id: &str,
        date: NaiveDate,
    ) -> remote::Result<Vec<Booking>> {
        self.check_ins(kennel_id, date)
            .await
            .map_err(RemoteError::from)
    }

    async fn active_bookings(
        &self,
        kennel_id: &str,
        date: NaiveDate,
    ) -> remote::Result<Vec<Booking>> {
        KennelsyncClient::active_bookings(self, kennel_id, date)
            .await
            .map_err(RemoteError::from)
    }
}
