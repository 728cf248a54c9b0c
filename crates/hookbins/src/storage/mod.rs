//! Storage backend implementations.
//!
//! This module provides concrete implementations of the store traits
//! defined in `hookbins_core::storage`, plus the caching decorator that
//! turns a store into a `BinRepository`.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! The in-memory store is always available.

pub mod cached;
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use cached::CachedBinRepository;
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
