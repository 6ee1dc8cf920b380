//! HTTP client for the kennelsync API.

pub mod boarding;
pub mod collections;

use reqwest::{IntoUrl, Method, Url};

use crate::error::{ClientError, Result};

/// HTTP client for the kennelsync API.
///
/// Implements `RemoteSource<E>` for every entity and `BoardingQueries`.
#[derive(Debug, Clone)]
pub struct KennelsyncClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl KennelsyncClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` with every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build a URL for an endpoint whose trailing segments carry ids.
    ///
    /// Each segment is percent-encoded, so ids cannot change the route.
    fn segment_url(&self, prefix: &str, segments: &[&str]) -> Result<Url> {
        let mut url =
            Url::parse(&self.url(prefix)).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(self.base_url.clone()))?
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.request_url(method, self.url(path))
    }

    fn request_url(&self, method: Method, url: impl IntoUrl) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()))
        } else if status.as_u16() == 404 {
            Err(ClientError::NotFound {
                resource: response.url().path().to_string(),
            })
        } else {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = error_message(&body, status);
            tracing::debug!(status = status.as_u16(), message = %message, "Request rejected");
            Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Pulls a readable message out of an error body.
///
/// Accepts `{"error": "..."}` or `{"message": "..."}`, otherwise the raw text.
fn error_message(body: &str, status: reqwest::StatusCode) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["error", "message"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        });

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().to_string(),
        None => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = KennelsyncClient::new("https://api.example.com/");

        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(
            client.url("/api/pets"),
            "https://api.example.com/api/pets"
        );
    }

    #[test]
    fn test_error_message_prefers_json_field() {
        let status = reqwest::StatusCode::BAD_REQUEST;

        assert_eq!(
            error_message(r#"{"error":"Pet name is required"}"#, status),
            "Pet name is required"
        );
        assert_eq!(
            error_message(r#"{"message":"Kennel is full"}"#, status),
            "Kennel is full"
        );
        assert_eq!(error_message("plain failure\n", status), "plain failure");
        assert_eq!(error_message("", status), "Bad Request");
    }
}
