//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StoreError` from
//! `kennelsync_core::storage`. Errors that mean the file itself cannot be used
//! become `StorageUnavailable`; everything else is `QueryFailed`.

use kennelsync_core::storage::StoreError;

/// Maps a rusqlite error to a StoreError.
///
/// # Error Mapping
///
/// - `CannotOpen`, `ReadOnly`, `PermissionDenied`, `NotADatabase`,
///   `SystemIoFailure`, `DiskFull`, `DatabaseCorrupt` → `StoreError::StorageUnavailable`
/// - All other errors → `StoreError::QueryFailed`
pub fn map_rusqlite_error(err: &rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if matches!(
                sqlite_err.code,
                rusqlite::ErrorCode::CannotOpen
                    | rusqlite::ErrorCode::ReadOnly
                    | rusqlite::ErrorCode::PermissionDenied
                    | rusqlite::ErrorCode::NotADatabase
                    | rusqlite::ErrorCode::SystemIoFailure
                    | rusqlite::ErrorCode::DiskFull
                    | rusqlite::ErrorCode::DatabaseCorrupt
            ) =>
        {
            StoreError::StorageUnavailable(err.to_string())
        }

        _ => StoreError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StoreError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> StoreError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err),
        tokio_rusqlite::Error::ConnectionClosed => StoreError::Closed,
        tokio_rusqlite::Error::Close(_) => {
            StoreError::StorageUnavailable("Connection could not be closed cleanly".to_string())
        }
        _ => StoreError::QueryFailed(err.to_string()),
    }
}

/// Maps any failure while opening or preparing the file.
///
/// Nothing has been served yet, so every failure here means the location is
/// unusable.
pub fn map_open_error(err: tokio_rusqlite::Error) -> StoreError {
    match map_tokio_rusqlite_error(err) {
        StoreError::QueryFailed(message) => StoreError::StorageUnavailable(message),
        other => other,
    }
}
