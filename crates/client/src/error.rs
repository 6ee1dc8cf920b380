//! Client error types.

use kennelsync_core::remote::RemoteError;
use thiserror::Error;

/// Result type alias for client module.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    ServerError { status: u16, message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<ClientError> for RemoteError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(err) => RemoteError::Request(err.to_string()),
            ClientError::ServerError { status, message } => {
                RemoteError::Rejected { status, message }
            }
            ClientError::NotFound { resource } => RemoteError::NotFound(resource),
            ClientError::InvalidResponse(message) => RemoteError::InvalidResponse(message),
            ClientError::InvalidUrl(url) => RemoteError::Request(format!("Invalid URL: {url}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_becomes_rejected() {
        let err = ClientError::ServerError {
            status: 422,
            message: "checkOut must be after checkIn".to_string(),
        };

        assert_eq!(
            RemoteError::from(err),
            RemoteError::Rejected {
                status: 422,
                message: "checkOut must be after checkIn".to_string()
            }
        );
    }

    #[test]
    fn test_not_found_keeps_resource() {
        let err = ClientError::NotFound {
            resource: "/api/kennels/k9/check-ins".to_string(),
        };

        assert_eq!(
            RemoteError::from(err),
            RemoteError::NotFound("/api/kennels/k9/check-ins".to_string())
        );
    }

    #[test]
    fn test_invalid_url_becomes_request_failure() {
        let err = ClientError::InvalidUrl("relative URL without a base".to_string());

        assert_eq!(
            RemoteError::from(err),
            RemoteError::Request("Invalid URL: relative URL without a base".to_string())
        );
    }
}
