use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Collection, Entity};

/// Kind of animal being boarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    Dog,
    Cat,
    Rabbit,
    Bird,
    Other,
}

/// A pet belonging to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    pub id: String,
    /// The user that owns this pet. Not checked against the users collection.
    pub owner_id: String,
    pub name: String,
    pub species: Species,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Age in whole years on the given date, when the birth date is known.
    pub fn age_years(&self, on: NaiveDate) -> Option<u32> {
        let birth = self.birth_date?;
        on.years_since(birth)
    }
}

/// Fields supplied when adding a pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPet {
    pub owner_id: String,
    pub name: String,
    pub species: Species,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl NewPet {
    /// Creates a draft with only the required fields.
    pub fn new(owner_id: impl Into<String>, name: impl Into<String>, species: Species) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: name.into(),
            species,
            breed: None,
            birth_date: None,
            weight_kg: None,
            notes: None,
            photo_url: None,
        }
    }

    /// Sets the breed.
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Sets the birth date.
    pub fn with_birth_date(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }
}

impl Entity for Pet {
    type Draft = NewPet;
    const COLLECTION: Collection = Collection::Pets;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.owner_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewPet) -> Self {
        Self {
            id,
            owner_id: draft.owner_id,
            name: draft.name,
            species: draft.species,
            breed: draft.breed,
            birth_date: draft.birth_date,
            weight_kg: draft.weight_kg,
            notes: draft.notes,
            photo_url: draft.photo_url,
            created_at: at,
            updated_at: at,
        }
    }
}
