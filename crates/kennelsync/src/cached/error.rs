use thiserror::Error;

use kennelsync_core::models::Collection;
use kennelsync_core::remote::RemoteError;
use kennelsync_core::storage::StoreError;

/// Errors returned by [`super::CachedRepository`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RepositoryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Could not load {collection}: {source}")]
    RemoteReadFailed {
        collection: Collection,
        source: RemoteError,
    },
    #[error("Could not save to {collection}: {source}")]
    RemoteWriteFailed {
        collection: Collection,
        source: RemoteError,
    },
}

impl RepositoryError {
    /// Text suitable for showing to the user directly.
    ///
    /// Remote failures surface the server's message unchanged.
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::Store(err) => err.to_string(),
            RepositoryError::RemoteReadFailed { source, .. }
            | RepositoryError::RemoteWriteFailed { source, .. } => source.message().to_string(),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_remote_text() {
        let err = RepositoryError::RemoteWriteFailed {
            collection: Collection::Bookings,
            source: RemoteError::Rejected {
                status: 409,
                message: "Kennel is fully booked".to_string(),
            },
        };

        assert_eq!(err.user_message(), "Kennel is fully booked");
        assert_eq!(
            err.to_string(),
            "Could not save to bookings: Server rejected the request (409): Kennel is fully booked"
        );
    }

    #[test]
    fn test_store_error_converts() {
        let err: RepositoryError = StoreError::Closed.into();

        assert_eq!(err, RepositoryError::Store(StoreError::Closed));
        assert_eq!(err.user_message(), "Local storage has been closed");
    }
}
