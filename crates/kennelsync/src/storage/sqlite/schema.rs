//! SQLite schema definitions and SQL query builders.
//!
//! Pure data, no I/O. Table names come from the fixed [`Collection`] set and
//! are never taken from user input.

use kennelsync_core::models::Collection;

/// SQL statement to create all tables.
///
/// Each collection is `(id, data)` where `data` is the JSON-serialized entity.
/// The schema is not versioned.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS pets (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS bookings (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS medical_records (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS vaccines (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS kennels (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS kennel_runs (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS stay_updates (id TEXT PRIMARY KEY, data TEXT NOT NULL);
CREATE TABLE IF NOT EXISTS invoices (id TEXT PRIMARY KEY, data TEXT NOT NULL);

-- Persisted preferences
CREATE TABLE IF NOT EXISTS settings (key TEXT PRIMARY KEY, value TEXT NOT NULL);
"#;

/// Takes and releases a write lock so a read-only file fails at open time.
pub const PROBE_WRITE: &str = "BEGIN IMMEDIATE; COMMIT;";

// Settings queries
pub const UPSERT_SETTING: &str = r#"
INSERT OR REPLACE INTO settings (key, value)
VALUES (?1, ?2)
"#;

pub const SELECT_SETTING: &str = r#"
SELECT value
FROM settings
WHERE key = ?1
"#;

/// Replaces any existing row with the same id.
pub fn upsert_row(collection: Collection) -> String {
    format!(
        "INSERT OR REPLACE INTO {} (id, data) VALUES (?1, ?2)",
        collection.table_name()
    )
}

pub fn select_row(collection: Collection) -> String {
    format!("SELECT data FROM {} WHERE id = ?1", collection.table_name())
}

pub fn select_all_rows(collection: Collection) -> String {
    format!("SELECT data FROM {}", collection.table_name())
}
