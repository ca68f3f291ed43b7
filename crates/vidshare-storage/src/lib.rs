//! Vidshare Storage Library
//!
//! This crate provides the media store abstraction and its implementations.
//! A media store is the whole backend collaborator: object storage for video
//! binaries plus the `videos` and `comments` tables.
//!
//! # Object key format
//!
//! Every backend names stored binaries `{unix_millis}-{sanitized_name}`, where
//! the sanitized name keeps ASCII letters, digits, `.` and `-` and replaces
//! everything else with `_`. Key generation is centralized in the `keys` module
//! so all backends stay consistent. Objects are never overwritten.

pub mod factory;
pub mod keys;
#[cfg(feature = "store-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "store-rest")]
pub mod rest;
mod tables;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
#[cfg(feature = "store-local")]
pub use local::LocalStore;
pub use memory::MemoryStore;
#[cfg(feature = "store-rest")]
pub use rest::RestStore;
pub use traits::{MediaStore, StoreError, StoreResult};
pub use vidshare_core::StoreBackend;
