//! SQLite storage backend implementation.
//!
//! A `BinStore` backed by SQLite, using `rusqlite` for synchronous operations
//! and `tokio-rusqlite` for async wrapping.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
