use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Collection, Entity};

/// Where a booking is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
}

/// A stay of one or more pets at a kennel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    /// The user who made the booking.
    pub user_id: String,
    pub kennel_id: String,
    #[serde(default)]
    pub pet_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub check_in: NaiveDate,
    /// Departure day. The pet does not stay the night of this date.
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Number of nights booked.
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(0)
    }

    /// Returns true if the pets are (or should be) on site on `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        matches!(
            self.status,
            BookingStatus::Confirmed | BookingStatus::CheckedIn
        ) && self.check_in <= date
            && date < self.check_out
    }

    /// Returns true if this booking is expected to check in on `date`.
    pub fn checks_in_on(&self, date: NaiveDate) -> bool {
        self.status == BookingStatus::Confirmed && self.check_in == date
    }
}

/// Fields supplied when requesting a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_id: String,
    pub kennel_id: String,
    #[serde(default)]
    pub pet_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewBooking {
    /// Creates a pending booking request.
    pub fn new(
        user_id: impl Into<String>,
        kennel_id: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            kennel_id: kennel_id.into(),
            pet_ids: Vec::new(),
            run_id: None,
            check_in,
            check_out,
            status: BookingStatus::Pending,
            notes: None,
        }
    }

    /// Adds a pet to the booking.
    pub fn with_pet(mut self, pet_id: impl Into<String>) -> Self {
        self.pet_ids.push(pet_id.into());
        self
    }

    /// Sets the initial status.
    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }
}

impl Entity for Booking {
    type Draft = NewBooking;
    const COLLECTION: Collection = Collection::Bookings;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.user_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewBooking) -> Self {
        Self {
            id,
            user_id: draft.user_id,
            kennel_id: draft.kennel_id,
            pet_ids: draft.pet_ids,
            run_id: draft.run_id,
            check_in: draft.check_in,
            check_out: draft.check_out,
            status: draft.status,
            notes: draft.notes,
            created_at: at,
            updated_at: at,
        }
    }
}
