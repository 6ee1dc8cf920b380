//! Contracts for the hosted source of truth.

mod error;
mod traits;

pub use error::{RemoteError, Result};
pub use traits::{BoardingQueries, RemoteSource};
