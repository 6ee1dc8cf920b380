//! In-memory storage implementation.

mod store;

pub use store::MemoryStore;
