//! Application state with repository-based storage.
//!
//! Wires the configured store and cache into a `CachedBinRepository` and
//! exposes it as a trait object. Backends are selected at compile time:
//!
//! | Features         | Store      | Cache  |
//! |------------------|------------|--------|
//! | (none)           | in-memory  | memory |
//! | `sqlite`         | SQLite     | memory |
//! | `redis`          | in-memory  | Redis  |
//! | `sqlite,redis`   | SQLite     | Redis  |

use std::sync::Arc;

use hookbins_core::cache::CacheNamespace;
use hookbins_core::storage::BinRepository;

use crate::config::Config;
use crate::storage::CachedBinRepository;

#[cfg(feature = "redis")]
use crate::cache::RedisCache;
#[cfg(not(feature = "redis"))]
use crate::cache::MemoryCache;
#[cfg(not(feature = "sqlite"))]
use crate::storage::InMemoryRepository;
#[cfg(feature = "sqlite")]
use crate::storage::SqliteRepository;

#[cfg(feature = "sqlite")]
type Store = SqliteRepository;
#[cfg(not(feature = "sqlite"))]
type Store = InMemoryRepository;

#[cfg(feature = "redis")]
type ActiveCache = RedisCache;
#[cfg(not(feature = "redis"))]
type ActiveCache = MemoryCache;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Bin repository (cached, wraps underlying storage).
    pub bins: Arc<dyn BinRepository>,
}

impl AppState {
    /// Creates a new AppState with the given repository.
    pub fn with_repository(bins: Arc<dyn BinRepository>) -> Self {
        Self { bins }
    }

    /// Connects the compiled-in store and cache backends.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let store = Arc::new(open_store(config).await?);
        let cache = Arc::new(open_cache(config).await?);
        let namespace = CacheNamespace::new(config.cache_namespace.clone());

        tracing::info!(
            store = std::any::type_name::<Store>(),
            cache = std::any::type_name::<ActiveCache>(),
            namespace = %namespace.prefix(),
            ttl = ?config.cache_ttl,
            "Bin repository ready"
        );

        let bins = CachedBinRepository::new(store, cache, namespace, config.cache_ttl);

        Ok(Self::with_repository(Arc::new(bins)))
    }
}

/// Opens the durable store, creating its schema if needed.
#[cfg(feature = "sqlite")]
pub async fn open_store(config: &Config) -> Result<Store, anyhow::Error> {
    Ok(SqliteRepository::new(&config.sqlite_path).await?)
}

/// Opens the durable store. The in-memory store has no schema to create.
#[cfg(not(feature = "sqlite"))]
pub async fn open_store(_config: &Config) -> Result<Store, anyhow::Error> {
    Ok(InMemoryRepository::new())
}

#[cfg(feature = "redis")]
async fn open_cache(config: &Config) -> Result<ActiveCache, anyhow::Error> {
    Ok(RedisCache::new(&config.redis_url, config.redis_timeout).await?)
}

#[cfg(not(feature = "redis"))]
async fn open_cache(config: &Config) -> Result<ActiveCache, anyhow::Error> {
    Ok(MemoryCache::new(config.cache_max_entries)?)
}
