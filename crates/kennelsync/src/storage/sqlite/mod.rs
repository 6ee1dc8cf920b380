//! SQLite storage implementation.
//!
//! Uses `tokio-rusqlite` for async access to a single on-device database file.

mod error;
mod schema;
mod store;

pub use store::SqliteStore;
