//! Remote source implementations that live in this crate.
//!
//! The HTTP implementation is in `kennelsync_client`.

mod inmemory;

pub use inmemory::InMemoryRemote;
