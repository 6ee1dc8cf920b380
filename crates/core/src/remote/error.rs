use thiserror::Error;

/// Errors reported by the remote source of truth.
///
/// Every variant carries text suitable for showing to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RemoteError {
    #[error("Could not reach the server: {0}")]
    Request(String),
    #[error("Server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl RemoteError {
    /// The message without the transport prefix, for alerts.
    pub fn message(&self) -> &str {
        match self {
            RemoteError::Request(message)
            | RemoteError::Rejected { message, .. }
            | RemoteError::NotFound(message)
            | RemoteError::InvalidResponse(message) => message,
        }
    }
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let error = RemoteError::Rejected {
            status: 403,
            message: "permission denied".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Server rejected the request (403): permission denied"
        );
        assert_eq!(error.message(), "permission denied");
    }

    #[test]
    fn test_request_display() {
        let error = RemoteError::Request("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Could not reach the server: connection refused"
        );
    }
}
