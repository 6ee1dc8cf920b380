//! kennelsync - offline-first local cache for the boarding backend.
//!
//! - `storage`: Key-value store implementations (SQLite, in-memory)
//! - `cached`: Cache-aside repositories, one per collection
//! - `refresh`: Detached background refresh queue
//! - `settings`: Typed settings and preferences
//! - `remote`: In-memory source of truth
//! - `state`: Composition root

pub mod cached;
pub mod cli;
pub mod config;
pub mod refresh;
pub mod remote;
pub mod settings;
pub mod state;
pub mod storage;

pub use cached::{CachePolicy, CachedRepository, RepositoryError};
pub use config::Config;
pub use refresh::{RefreshEvent, RefreshHandle, RefreshOutcome, RefreshQueue};
pub use settings::Settings;
pub use state::AppContext;
