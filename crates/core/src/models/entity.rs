use std::fmt;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A named logical table of same-shaped domain entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Pets,
    Bookings,
    MedicalRecords,
    Vaccines,
    Kennels,
    KennelRuns,
    StayUpdates,
    Invoices,
}

impl Collection {
    /// Every collection, in schema order.
    pub const ALL: [Collection; 9] = [
        Collection::Users,
        Collection::Pets,
        Collection::Bookings,
        Collection::MedicalRecords,
        Collection::Vaccines,
        Collection::Kennels,
        Collection::KennelRuns,
        Collection::StayUpdates,
        Collection::Invoices,
    ];

    /// Table name in the local store. Also used as the remote path segment.
    pub fn table_name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Pets => "pets",
            Collection::Bookings => "bookings",
            Collection::MedicalRecords => "medical_records",
            Collection::Vaccines => "vaccines",
            Collection::Kennels => "kennels",
            Collection::KennelRuns => "kennel_runs",
            Collection::StayUpdates => "stay_updates",
            Collection::Invoices => "invoices",
        }
    }

    /// Parses a table name back into a collection.
    pub fn from_table_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.table_name() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// A domain record stored as an opaque JSON blob in one collection.
///
/// The remote source of truth turns a [`Entity::Draft`] into an entity by
/// assigning its `id` and timestamps.
pub trait Entity:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Caller-supplied fields for creating a new entity.
    type Draft: Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;

    /// The collection this entity lives in.
    const COLLECTION: Collection;

    /// Unique identifier within the collection.
    fn id(&self) -> &str;

    /// Owner or foreign key used to filter reads.
    fn owner_key(&self) -> &str;

    /// Builds the entity the way the source of truth does on create.
    fn from_draft(id: String, at: DateTime<Utc>, draft: Self::Draft) -> Self;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_are_unique() {
        let mut names: Vec<_> = Collection::ALL.iter().map(|c| c.table_name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Collection::ALL.len());
    }

    #[test]
    fn test_from_table_name_roundtrip() {
        for collection in Collection::ALL {
            assert_eq!(
                Collection::from_table_name(collection.table_name()),
                Some(collection)
            );
        }
        assert_eq!(Collection::from_table_name("settings"), None);
    }

    #[test]
    fn test_display_uses_table_name() {
        assert_eq!(Collection::KennelRuns.to_string(), "kennel_runs");
    }
}
