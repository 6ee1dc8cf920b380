//! kennelsync_client - HTTP client for the kennelsync boarding API.
//!
//! Implements the remote traits from `kennelsync_core::remote` over `reqwest`.

pub mod client;
pub mod error;

pub use client::KennelsyncClient;
pub use error::{ClientError, Result};
