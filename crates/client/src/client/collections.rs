//! Collection API operations.

use async_trait::async_trait;
use reqwest::Method;

use kennelsync_core::models::{Collection, Entity};
use kennelsync_core::remote::{self, RemoteError, RemoteSource};

use super::KennelsyncClient;
use crate::error::Result;

/// Path of a collection endpoint, e.g. `/api/medical_records`.
pub fn collection_path(collection: Collection) -> String {
    format!("/api/{}", collection.table_name())
}

impl KennelsyncClient {
    /// List the entities of one owner.
    pub async fn list_by_owner<E: Entity>(&self, owner_key: &str) -> Result<Vec<E>> {
        let response = self
            .request(Method::GET, &collection_path(E::COLLECTION))
            .query(&[("owner", owner_key)])
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create an entity from a draft. The server assigns id and timestamps.
    pub async fn create_entity<E: Entity>(&self, draft: &E::Draft) -> Result<E> {
        let response = self
            .request(Method::POST, &collection_path(E::COLLECTION))
            .json(draft)
            .send()
            .await?;
        self.handle_response(response).await
    }
}

#[async_trait]
impl<E: Entity> RemoteSource<E> for KennelsyncClient {
    async fn fetch_by_owner(&self, owner_key: &str) -> remote::Result<Vec<E>> {
        self.list_by_owner(owner_key).await.map_err(RemoteError::from)
    }

    async fn create(&self, draft: &E::Draft) -> remote::Result<E> {
        self.create_entity::<E>(draft)
            .await
            .map_err(RemoteError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_server::serve_once;
    use kennelsync_core::models::{NewPet, Pet, Species, Vaccine};

    const PET_JSON: &str = r#"{"id":"p1","ownerId":"u1","name":"Rex","species":"dog","createdAt":"2024-06-15T10:30:00Z","updatedAt":"2024-06-15T10:30:00Z"}"#;

    #[test]
    fn test_collection_path_uses_table_name() {
        assert_eq!(collection_path(Collection::Pets), "/api/pets");
        assert_eq!(
            collection_path(Collection::MedicalRecords),
            "/api/medical_records"
        );
    }

    #[tokio::test]
    async fn test_fetch_by_owner_sends_owner_query() {
        let body = format!("[{PET_JSON}]");
        let (base_url, server) = serve_once("200 OK", &body).await;
        let client = KennelsyncClient::new(base_url).with_token("t0k3n");

        let pets: Vec<Pet> = client.list_by_owner("u1").await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(pets.len(), 1);
        assert_eq!(pets[0].id, "p1");
        assert!(request.starts_with("GET /api/pets?owner=u1 HTTP/1.1"));
        assert!(request.to_lowercase().contains("authorization: bearer t0k3n"));
    }

    #[tokio::test]
    async fn test_create_posts_draft() {
        let (base_url, server) = serve_once("201 Created", PET_JSON).await;
        let client = KennelsyncClient::new(base_url);

        let pet: Pet = client
            .create_entity::<Pet>(&NewPet::new("u1", "Rex", Species::Dog))
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(pet.name, "Rex");
        assert!(request.starts_with("POST /api/pets HTTP/1.1"));
        assert!(request.contains(r#""ownerId":"u1""#));
    }

    #[tokio::test]
    async fn test_rejected_create_maps_to_remote_error() {
        let (base_url, _server) =
            serve_once("400 Bad Request", r#"{"error":"Pet name is required"}"#).await;
        let client = KennelsyncClient::new(base_url);

        let draft = NewPet::new("u1", "", Species::Dog);
        let result = RemoteSource::<Pet>::create(&client, &draft).await;

        assert_eq!(
            result,
            Err(RemoteError::Rejected {
                status: 400,
                message: "Pet name is required".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let (base_url, _server) = serve_once("200 OK", r#"{"not":"a list"}"#).await;
        let client = KennelsyncClient::new(base_url);

        let result = RemoteSource::<Vaccine>::fetch_by_owner(&client, "p1").await;

        assert!(matches!(result, Err(RemoteError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_request_error() {
        // Nothing listens on port 1.
        let client = KennelsyncClient::new("http://127.0.0.1:1");

        let result = RemoteSource::<Pet>::fetch_by_owner(&client, "u1").await;

        assert!(matches!(result, Err(RemoteError::Request(_))));
    }
}
