//! Cache-aside repositories over the local store.
//!
//! - **Reads**: serve from the local store when it has data for the owner and
//!   refresh in the background; otherwise fetch from the remote
//! - **Writes**: create on the remote first, then mirror locally

mod error;
mod repository;

pub use error::{RepositoryError, Result};
pub use repository::{CachePolicy, CachedRepository};
