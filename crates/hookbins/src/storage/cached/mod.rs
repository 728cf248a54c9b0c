//! Cached repository decorators.
//!
//! Wraps a `BinStore` with caching behavior:
//!
//! - **Reads**: Check cache first, on miss fetch from the store and populate cache
//! - **Writes**: Invalidate cache, then persist to the store
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let store = Arc::new(SqliteRepository::new("hookbins.db").await?);
//! let cache = Arc::new(MemoryCache::new(10_000)?);
//! let namespace = CacheNamespace::new("hookbins");
//!
//! let bins = CachedBinRepository::new(store, cache, namespace, Duration::from_secs(60));
//! ```

mod bin;

pub use bin::CachedBinRepository;
