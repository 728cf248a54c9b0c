//! In-memory storage backend for testing.
//!
//! Stores bins in a `Vec` wrapped in `Arc<RwLock<_>>`, in creation order.
//! Useful for tests and throwaway runs where persistence is not required.
//!
//! # Example
//!
//! ```rust,ignore
//! use hookbins::storage::inmemory::InMemoryRepository;
//!
//! let store = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
