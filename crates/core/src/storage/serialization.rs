//! Pure functions for converting domain values to and from stored JSON text.

use serde::{de::DeserializeOwned, Serialize};

use crate::models::Entity;

use super::{Result, StoreError};

/// Serializes an entity to the JSON stored in its collection's `data` column.
pub fn encode_entity<E: Entity>(entity: &E) -> Result<String> {
    encode_value(entity)
}

/// Deserializes a stored `data` column back into an entity.
pub fn decode_entity<E: Entity>(data: &str) -> Result<E> {
    decode_value(data)
}

/// Serializes any value (settings use this directly).
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Deserializes any value.
pub fn decode_value<T: DeserializeOwned>(data: &str) -> Result<T> {
    serde_json::from_str(data).map_err(|e| StoreError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewPet, Pet, Species};
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_roundtrip_pet() {
        let pet = Pet::from_draft(
            "p1".to_string(),
            Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap(),
            NewPet::new("u1", "Rex", Species::Dog),
        );

        let data = encode_entity(&pet).expect("encode should succeed");
        let decoded: Pet = decode_entity(&data).expect("decode should succeed");

        assert_eq!(pet, decoded);
    }

    #[test]
    fn test_decode_invalid_json_is_serialization_error() {
        let result: Result<Pet> = decode_entity("{not json");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }

    #[test]
    fn test_decode_wrong_shape_is_serialization_error() {
        let result: Result<Pet> = decode_entity(r#"{"id":"p1"}"#);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}
