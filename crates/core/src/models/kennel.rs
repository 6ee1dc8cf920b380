use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Collection, Entity};

/// A boarding facility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kennel {
    pub id: String,
    /// The operator account that runs this facility.
    pub owner_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub capacity: u32,
    pub nightly_rate_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKennel {
    pub owner_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub capacity: u32,
    pub nightly_rate_cents: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewKennel {
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>, capacity: u32) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            address: None,
            city: None,
            capacity,
            nightly_rate_cents: 0,
            description: None,
        }
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }
}

impl Entity for Kennel {
    type Draft = NewKennel;
    const COLLECTION: Collection = Collection::Kennels;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.owner_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewKennel) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            name: draft.name,
            address: draft.address,
            city: draft.city,
            capacity: draft.capacity,
            nightly_rate_cents: draft.nightly_rate_cents,
            description: draft.description,
            created_at: at,
            updated_at: at,
        }
    }
}

/// Size class of a run (enclosure) within a kennel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunSize {
    Small,
    Medium,
    Large,
}

/// An individual enclosure pets are assigned to during a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KennelRun {
    pub id: String,
    pub kennel_id: String,
    pub name: String,
    pub size: RunSize,
    #[serde(default)]
    pub indoor: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewKennelRun {
    pub kennel_id: String,
    pub name: String,
    pub size: RunSize,
    #[serde(default)]
    pub indoor: bool,
}

impl Entity for KennelRun {
    type Draft = NewKennelRun;
    const COLLECTION: Collection = Collection::KennelRuns;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.kennel_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewKennelRun) -> Self {
        Self {
            id,
            kennel_id: draft.kennel_id,
            name: draft.name,
            size: draft.size,
            indoor: draft.indoor,
            created_at: at,
            updated_at: at,
        }
    }
}
