//! Core types for kennelsync.
//!
//! Pure data and contracts only: domain entities, the local store trait, the
//! remote source traits and the functions that operate on them. No I/O lives
//! in this crate.

pub mod models;
pub mod remote;
pub mod storage;
