use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::entity::{Collection, Entity};

/// A vet visit, condition or treatment recorded against a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: String,
    pub pet_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vet_name: Option<String>,
    pub recorded_on: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMedicalRecord {
    pub pet_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vet_name: Option<String>,
    pub recorded_on: NaiveDate,
}

impl Entity for MedicalRecord {
    type Draft = NewMedicalRecord;
    const COLLECTION: Collection = Collection::MedicalRecords;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.pet_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewMedicalRecord) -> Self {
        Self {
            id,
            pet_id: draft.pet_id,
            title: draft.title,
            description: draft.description,
            vet_name: draft.vet_name,
            recorded_on: draft.recorded_on,
            created_at: at,
            updated_at: at,
        }
    }
}

/// A vaccination given to a pet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccine {
    pub id: String,
    pub pet_id: String,
    pub name: String,
    pub administered_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vaccine {
    /// A vaccine without an expiry date never lapses.
    pub fn is_current(&self, on: NaiveDate) -> bool {
        self.expires_on.is_none_or(|expiry| expiry >= on)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVaccine {
    pub pet_id: String,
    pub name: String,
    pub administered_on: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
}

impl Entity for Vaccine {
    type Draft = NewVaccine;
    const COLLECTION: Collection = Collection::Vaccines;

    fn id(&self) -> &str {
        &self.id
    }

    fn owner_key(&self) -> &str {
        &self.pet_id
    }

    fn from_draft(id: String, at: DateTime<Utc>, draft: NewVaccine) -> Self {
        Self {
            id,
            pet_id: draft.pet_id,
            name: draft.name,
            administered_on: draft.administered_on,
            expires_on: draft.expires_on,
            created_at: at,
            updated_at: at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vaccine(expires_on: Option<NaiveDate>) -> Vaccine {
        let draft = NewVaccine {
            pet_id: "p1".to_string(),
            name: "Rabies".to_string(),
            administered_on: NaiveDate::from_ymd_opt(2023, 5, 1).unwrap(),
            expires_on,
        };
        Vaccine::from_draft("v1".to_string(), Utc::now(), draft)
    }

    #[test]
    fn test_vaccine_without_expiry_is_current() {
        let on = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert!(vaccine(None).is_current(on));
    }

    #[test]
    fn test_vaccine_current_through_expiry_day() {
        let expiry = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let v = vaccine(Some(expiry));

        assert!(v.is_current(expiry));
        assert!(!v.is_current(expiry.succ_opt().unwrap()));
    }

    #[test]
    fn test_medical_record_owned_by_pet() {
        let record = MedicalRecord::from_draft(
            "m1".to_string(),
            Utc::now(),
            NewMedicalRecord {
                pet_id: "p9".to_string(),
                title: "Annual checkup".to_string(),
                description: None,
                vet_name: Some("Dr. Vega".to_string()),
                recorded_on: NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            },
        );
        assert_eq!(record.owner_key(), "p9");
        assert_eq!(MedicalRecord::COLLECTION, Collection::MedicalRecords);
    }
}
