use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Collection, Entity};

/// A note or photo posted by staff during a stay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StayUpdate {
    pub id: String,
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStayUpdate {
    pub booking_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pet_id: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl Entity for StayUpdate {
    type Draft = NewStayUpdate;
    const COLLECTION: Collection = Collection::StayUpdates;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.booking_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewStayUpdate) -> Self {
        Self {
            id,
            booking_id: draft.booking_id,
            pet_id: draft.pet_id,
            message: draft.message,
            photo_url: draft.photo_url,
            created_at: at,
            updated_at: at,
        }
    }
}
