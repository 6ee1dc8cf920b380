//! Local store implementations.
//!
//! - `sqlite`: On-device SQLite file used by the application
//! - `inmemory`: HashMap-backed store for tests

pub mod inmemory;
pub mod sqlite;

pub use inmemory::MemoryStore;
pub use sqlite::SqliteStore;
