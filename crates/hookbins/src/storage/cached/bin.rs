//! Cached bin repository.
//!
//! Composes a `BinStore` with a `Cache` behind the `BinRepository` contract.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use hookbins_core::bins::{validate_new_bin, validate_patch, Bin, BinPatch, NewBin};
use hookbins_core::cache::{deserialize_bin, serialize_bin, Cache, CacheNamespace};
use hookbins_core::pagination::QueryOpts;
use hookbins_core::storage::{
    require_account, BinRepository, BinStore, RepositoryError, Result,
};

/// Read-through, invalidate-on-write bin repository.
///
/// - **List**: always served by the store, never cached.
/// - **Get**: cache first; on a miss, fetch from the store and populate the cache.
/// - **Update / Delete**: invalidate the cached bin, then write to the store.
/// - **Create / Destroy**: straight to the store. Destroy leaves per-bin
///   entries in place until their TTL runs out.
///
/// Cache failures are surfaced as errors, never treated as a miss.
///
/// # Type Parameters
///
/// * `S` - The durable store
/// * `C` - The cache implementation
pub struct CachedBinRepository<S, C>
where
    S: BinStore,
    C: Cache,
{
    store: Arc<S>,
    cache: Arc<C>,
    namespace: CacheNamespace,
    ttl: Duration,
}

impl<S, C> CachedBinRepository<S, C>
where
    S: BinStore,
    C: Cache,
{
    /// Creates a new cached bin repository.
    ///
    /// # Arguments
    ///
    /// * `store` - The durable store to cache
    /// * `cache` - The cache implementation
    /// * `namespace` - Deployment-scoped key prefix
    /// * `ttl` - Time-to-live applied to every cached bin
    pub fn new(store: Arc<S>, cache: Arc<C>, namespace: CacheNamespace, ttl: Duration) -> Self {
        Self {
            store,
            cache,
            namespace,
            ttl,
        }
    }

    async fn invalidate(&self, account_id: &str, id: Uuid) -> Result<()> {
        let cache_key = self.namespace.bin_key(account_id, id);
        self.cache.delete(&cache_key).await.map_err(|err| {
            tracing::warn!(%account_id, bin_id = %id, error = %err, "Failed to invalidate bin cache");
            RepositoryError::from(err)
        })
    }
}

#[async_trait]
impl<S, C> BinRepository for CachedBinRepository<S, C>
where
    S: BinStore + 'static,
    C: Cache + 'static,
{
    async fn get_all(&self, account_id: &str, opts: QueryOpts) -> Result<Vec<Bin>> {
        require_account(account_id)?;
        let (offset, limit) = opts.window();
        self.store.list_bins(account_id, offset, limit).await
    }

    async fn get(&self, account_id: &str, id: Uuid) -> Result<Bin> {
        require_account(account_id)?;
        let cache_key = self.namespace.bin_key(account_id, id);

        // Check cache first. Empty values count as a miss.
        if let Some(bytes) = self.cache.get(&cache_key).await? {
            if !bytes.is_empty() {
                let bin = deserialize_bin(&bytes).map_err(|err| {
                    tracing::warn!(%account_id, bin_id = %id, error = %err, "Cached bin is corrupt");
                    RepositoryError::from(err)
                })?;
                tracing::trace!(%account_id, bin_id = %id, "Cache hit for bin");
                return Ok(bin);
            }
        }

        // Cache miss - fetch from the store
        tracing::trace!(%account_id, bin_id = %id, "Cache miss for bin");
        let bin = self
            .store
            .get_bin(account_id, id)
            .await?
            .ok_or_else(|| RepositoryError::bin_not_found(id))?;

        let bytes = serialize_bin(&bin)?;
        self.cache.set(&cache_key, &bytes, Some(self.ttl)).await?;

        Ok(bin)
    }

    async fn create(&self, account_id: &str, draft: &NewBin) -> Result<Bin> {
        require_account(account_id)?;
        validate_new_bin(draft)?;

        let bin = self.store.create_bin(account_id, draft).await?;

        tracing::debug!(%account_id, bin_id = %bin.id, title = %bin.title, "Bin created");
        Ok(bin)
    }

    async fn update(&self, account_id: &str, id: Uuid, patch: &BinPatch) -> Result<u64> {
        require_account(account_id)?;
        validate_patch(patch)?;

        // 1. Invalidate cache. A failure here leaves the store untouched.
        self.invalidate(account_id, id).await?;

        // 2. Persist to storage
        let affected = self.store.update_bin(account_id, id, patch).await?;

        tracing::debug!(%account_id, bin_id = %id, affected, "Bin updated");
        Ok(affected)
    }

    async fn delete(&self, account_id: &str, id: Uuid) -> Result<u64> {
        require_account(account_id)?;

        // 1. Invalidate cache
        self.invalidate(account_id, id).await?;

        // 2. Persist deletion to storage
        let affected = self.store.delete_bin(account_id, id).await?;

        tracing::debug!(%account_id, bin_id = %id, affected, "Bin deleted");
        Ok(affected)
    }

    async fn destroy(&self, account_id: &str) -> Result<u64> {
        require_account(account_id)?;

        let affected = self.store.destroy_bins(account_id).await?;

        tracing::debug!(%account_id, affected, "Bins destroyed");
        Ok(affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;
    use tokio::sync::RwLock;

    use hookbins_core::cache::{CacheError, Result as CacheResult};

    use crate::cache::memory::MemoryCache;
    use crate::storage::inmemory::InMemoryRepository;

    const TTL: Duration = Duration::from_secs(300);

    /// Shared record of backend calls, in the order they happened.
    type CallLog = Arc<Mutex<Vec<&'static str>>>;

    // Mock store that tracks calls
    struct MockBinStore {
        inner: InMemoryRepository,
        get_calls: AtomicUsize,
        list_calls: AtomicUsize,
        fail_get: AtomicBool,
        log: CallLog,
    }

    impl MockBinStore {
        fn new(log: CallLog) -> Self {
            Self {
                inner: InMemoryRepository::new(),
                get_calls: AtomicUsize::new(0),
                list_calls: AtomicUsize::new(0),
                fail_get: AtomicBool::new(false),
                log,
            }
        }

        fn record(&self, call: &'static str) {
            self.log.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl BinStore for MockBinStore {
        async fn list_bins(&self, account_id: &str, offset: i64, limit: i64) -> Result<Vec<Bin>> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.record("store.list");
            self.inner.list_bins(account_id, offset, limit).await
        }

        async fn get_bin(&self, account_id: &str, id: Uuid) -> Result<Option<Bin>> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            self.record("store.get");
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(RepositoryError::ConnectionFailed("store down".to_string()));
            }
            self.inner.get_bin(account_id, id).await
        }

        async fn create_bin(&self, account_id: &str, draft: &NewBin) -> Result<Bin> {
            self.record("store.create");
            self.inner.create_bin(account_id, draft).await
        }

        async fn update_bin(&self, account_id: &str, id: Uuid, patch: &BinPatch) -> Result<u64> {
            self.record("store.update");
            self.inner.update_bin(account_id, id, patch).await
        }

        async fn delete_bin(&self, account_id: &str, id: Uuid) -> Result<u64> {
            self.record("store.delete");
            self.inner.delete_bin(account_id, id).await
        }

        async fn destroy_bins(&self, account_id: &str) -> Result<u64> {
            self.record("store.destroy");
            self.inner.destroy_bins(account_id).await
        }
    }

    // Mock cache with failure injection
    struct MockCache {
        store: RwLock<HashMap<String, Vec<u8>>>,
        ttls: RwLock<HashMap<String, Option<Duration>>>,
        fail_get: AtomicBool,
        fail_set: AtomicBool,
        fail_delete: AtomicBool,
        log: CallLog,
    }

    impl MockCache {
        fn new(log: CallLog) -> Self {
            Self {
                store: RwLock::new(HashMap::new()),
                ttls: RwLock::new(HashMap::new()),
                fail_get: AtomicBool::new(false),
                fail_set: AtomicBool::new(false),
                fail_delete: AtomicBool::new(false),
                log,
            }
        }

        fn record(&self, call: &'static str) {
            self.log.lock().unwrap().push(call);
        }

        async fn contains(&self, key: &str) -> bool {
            self.store.read().await.contains_key(key)
        }
    }

    #[async_trait]
    impl Cache for MockCache {
        async fn get(&self, key: &str) -> CacheResult<Option<Vec<u8>>> {
            self.record("cache.get");
            if self.fail_get.load(Ordering::SeqCst) {
                return Err(CacheError::ConnectionFailed("cache down".to_string()));
            }
            Ok(self.store.read().await.get(key).cloned())
        }

        async fn set(&self, key: &str, value: &[u8], ttl: Option<Duration>) -> CacheResult<()> {
            self.record("cache.set");
            if self.fail_set.load(Ordering::SeqCst) {
                return Err(CacheError::OperationFailed("OOM".to_string()));
            }
            self.store
                .write()
                .await
                .insert(key.to_string(), value.to_vec());
            self.ttls.write().await.insert(key.to_string(), ttl);
            Ok(())
        }

        async fn delete(&self, key: &str) -> CacheResult<()> {
            self.record("cache.delete");
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(CacheError::ConnectionFailed("cache down".to_string()));
            }
            self.store.write().await.remove(key);
            Ok(())
        }
    }

    struct Fixture {
        store: Arc<MockBinStore>,
        cache: Arc<MockCache>,
        repo: CachedBinRepository<MockBinStore, MockCache>,
        log: CallLog,
    }

    fn fixture() -> Fixture {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let store = Arc::new(MockBinStore::new(log.clone()));
        let cache = Arc::new(MockCache::new(log.clone()));
        let repo = CachedBinRepository::new(
            store.clone(),
            cache.clone(),
            CacheNamespace::new("hookbins-test"),
            TTL,
        );
        Fixture {
            store,
            cache,
            repo,
            log,
        }
    }

    fn namespace() -> CacheNamespace {
        CacheNamespace::new("hookbins-test")
    }

    #[tokio::test]
    async fn test_get_cache_miss_populates_cache() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Invoice Hooks")).await.unwrap();

        let fetched = f.repo.get("acct-a", bin.id).await.unwrap();

        assert_eq!(fetched, bin);
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 1);
        let key = namespace().bin_key("acct-a", bin.id);
        assert!(f.cache.contains(&key).await);
        assert_eq!(f.cache.ttls.read().await.get(&key), Some(&Some(TTL)));
    }

    #[tokio::test]
    async fn test_get_read_through_fetches_store_once() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Invoice Hooks")).await.unwrap();

        // Cold cache - one store fetch
        f.repo.get("acct-a", bin.id).await.unwrap();
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 1);

        // Three more reads - served from cache
        for _ in 0..3 {
            let cached = f.repo.get("acct-a", bin.id).await.unwrap();
            assert_eq!(cached, bin);
        }
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_after_external_eviction_fetches_again() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();

        f.repo.get("acct-a", bin.id).await.unwrap();
        f.cache
            .delete(&namespace().bin_key("acct-a", bin.id))
            .await
            .unwrap();
        for _ in 0..3 {
            f.repo.get("acct-a", bin.id).await.unwrap();
        }

        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_invalidates_and_next_get_sees_patch() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Invoice Hooks")).await.unwrap();

        // First read consults the store, second is served from cache
        let first = f.repo.get("acct-a", bin.id).await.unwrap();
        let second = f.repo.get("acct-a", bin.id).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 1);

        let affected = f
            .repo
            .update("acct-a", bin.id, &BinPatch::new().with_title("Renamed"))
            .await
            .unwrap();
        assert_eq!(affected, 1);
        assert!(!f.cache.contains(&namespace().bin_key("acct-a", bin.id)).await);

        let renamed = f.repo.get("acct-a", bin.id).await.unwrap();
        assert_eq!(renamed.title, "Renamed");
        assert_eq!(renamed.id, bin.id);
        assert_eq!(renamed.created_at, bin.created_at);
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_update_invalidates_before_writing() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.log.lock().unwrap().clear();

        f.repo
            .update("acct-a", bin.id, &BinPatch::new().with_title("New"))
            .await
            .unwrap();

        assert_eq!(*f.log.lock().unwrap(), vec!["cache.delete", "store.update"]);
    }

    #[tokio::test]
    async fn test_delete_invalidates_before_writing() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.repo.get("acct-a", bin.id).await.unwrap();
        f.log.lock().unwrap().clear();

        let affected = f.repo.delete("acct-a", bin.id).await.unwrap();

        assert_eq!(affected, 1);
        assert_eq!(*f.log.lock().unwrap(), vec!["cache.delete", "store.delete"]);
        assert!(!f.cache.contains(&namespace().bin_key("acct-a", bin.id)).await);
        assert!(f.repo.get("acct-a", bin.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_invalidation_failure_aborts_write() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.cache.fail_delete.store(true, Ordering::SeqCst);
        f.log.lock().unwrap().clear();

        let err = f
            .repo
            .update("acct-a", bin.id, &BinPatch::new().with_title("New"))
            .await
            .unwrap_err();
        assert!(err.is_unavailable());
        assert!(f.repo.delete("acct-a", bin.id).await.is_err());

        // The store was never touched
        assert!(!f.log.lock().unwrap().iter().any(|c| c.starts_with("store.")));
        let stored = f.store.get_bin("acct-a", bin.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "Hooks");
    }

    #[tokio::test]
    async fn test_zero_effect_mutations_report_zero() {
        let f = fixture();
        let missing = Uuid::new_v4();

        let updated = f
            .repo
            .update("acct-a", missing, &BinPatch::new().with_title("x"))
            .await
            .unwrap();
        let deleted = f.repo.delete("acct-a", missing).await.unwrap();
        let destroyed = f.repo.destroy("acct-a").await.unwrap();

        assert_eq!((updated, deleted, destroyed), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_tenant_isolation_regardless_of_cache_state() {
        let f = fixture();
        let bin_b = f.repo.create("acct-b", &NewBin::new("B's bin")).await.unwrap();

        // Cold cache
        assert!(f.repo.get("acct-a", bin_b.id).await.unwrap_err().is_not_found());

        // Warm the owner's entry, then try again from the other tenant
        f.repo.get("acct-b", bin_b.id).await.unwrap();
        assert!(f.repo.get("acct-a", bin_b.id).await.unwrap_err().is_not_found());

        // Cross-tenant mutations affect nothing
        assert_eq!(f.repo.delete("acct-a", bin_b.id).await.unwrap(), 0);
        assert_eq!(f.repo.get("acct-b", bin_b.id).await.unwrap(), bin_b);
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let f = fixture();
        let missing = Uuid::new_v4();

        assert!(f.repo.get("acct-a", missing).await.unwrap_err().is_not_found());
        assert!(f.repo.get("acct-a", missing).await.unwrap_err().is_not_found());

        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 2);
        assert!(f.cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_leaves_cache_untouched() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.store.fail_get.store(true, Ordering::SeqCst);

        let err = f.repo.get("acct-a", bin.id).await.unwrap_err();

        assert!(err.is_unavailable());
        assert!(f.cache.store.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_an_error() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.cache
            .set(&namespace().bin_key("acct-a", bin.id), b"{not json", None)
            .await
            .unwrap();

        let err = f.repo.get("acct-a", bin.id).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Serialization(_)));
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_cache_value_is_a_miss() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.cache
            .set(&namespace().bin_key("acct-a", bin.id), b"", None)
            .await
            .unwrap();

        let fetched = f.repo.get("acct-a", bin.id).await.unwrap();

        assert_eq!(fetched, bin);
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cache_read_failure_fails_closed() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.cache.fail_get.store(true, Ordering::SeqCst);

        let err = f.repo.get("acct-a", bin.id).await.unwrap_err();

        assert!(err.is_unavailable());
        assert_eq!(f.store.get_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_write_back_failure_is_surfaced() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.cache.fail_set.store(true, Ordering::SeqCst);

        let err = f.repo.get("acct-a", bin.id).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Cache(_)));
    }

    #[tokio::test]
    async fn test_get_all_bypasses_cache() {
        let f = fixture();
        for i in 0..3 {
            f.repo
                .create("acct-a", &NewBin::new(format!("Bin {i}")))
                .await
                .unwrap();
        }
        f.log.lock().unwrap().clear();

        let first = f.repo.get_all("acct-a", QueryOpts::new(0, 10)).await.unwrap();
        let second = f.repo.get_all("acct-a", QueryOpts::new(0, 10)).await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(f.store.list_calls.load(Ordering::SeqCst), 2);
        assert!(!f.log.lock().unwrap().iter().any(|c| c.starts_with("cache.")));
    }

    #[tokio::test]
    async fn test_get_all_pagination_scenario() {
        let f = fixture();
        for i in 0..25 {
            f.repo
                .create("acct-a", &NewBin::new(format!("Bin {i}")))
                .await
                .unwrap();
        }

        let remainder = f.repo.get_all("acct-a", QueryOpts::new(2, 10)).await.unwrap();
        assert_eq!(remainder.len(), 5);
        assert_eq!(remainder[0].title, "Bin 20");

        let clamped = f.repo.get_all("acct-a", QueryOpts::new(0, -1)).await.unwrap();
        assert_eq!(clamped.len(), 1);
        assert_eq!(clamped[0].title, "Bin 0");

        let capped = f.repo.get_all("acct-a", QueryOpts::new(-4, 1_000)).await.unwrap();
        assert_eq!(capped.len(), 25);
    }

    #[tokio::test]
    async fn test_create_does_not_populate_cache() {
        let f = fixture();

        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();

        assert!(!f.cache.contains(&namespace().bin_key("acct-a", bin.id)).await);
        assert_eq!(bin.account_id, "acct-a");
        assert_eq!(bin.created_at, bin.updated_at);
    }

    #[tokio::test]
    async fn test_destroy_leaves_cached_entries_until_ttl() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        f.repo.get("acct-a", bin.id).await.unwrap();

        let affected = f.repo.destroy("acct-a").await.unwrap();
        assert_eq!(affected, 1);

        // Known bounded staleness: the cached copy is still served.
        let stale = f.repo.get("acct-a", bin.id).await.unwrap();
        assert_eq!(stale, bin);
        assert!(f.repo.get_all("acct-a", QueryOpts::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_any_backend_call() {
        let f = fixture();

        let err = f.repo.create("acct-a", &NewBin::new("  ")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));

        let err = f
            .repo
            .update("acct-a", Uuid::new_v4(), &BinPatch::new().with_title(""))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));

        let err = f.repo.get_all("", QueryOpts::default()).await.unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidData(_)));

        assert!(f.log.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_refreshes_updated_at_only() {
        let f = fixture();
        let bin = f.repo.create("acct-a", &NewBin::new("Hooks")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;

        f.repo
            .update("acct-a", bin.id, &BinPatch::new().with_title("Renamed"))
            .await
            .unwrap();
        let updated = f.repo.get("acct-a", bin.id).await.unwrap();

        assert_eq!(updated.id, bin.id);
        assert_eq!(updated.account_id, bin.account_id);
        assert_eq!(updated.created_at, bin.created_at);
        assert!(updated.updated_at > bin.updated_at);
    }

    #[tokio::test]
    async fn test_works_with_memory_cache_backend() {
        let store = Arc::new(InMemoryRepository::new());
        let cache = Arc::new(MemoryCache::new(100).unwrap());
        let repo = CachedBinRepository::new(store, cache.clone(), namespace(), TTL);

        let bin = repo.create("acct-a", &NewBin::new("Invoice Hooks")).await.unwrap();
        assert_eq!(repo.get("acct-a", bin.id).await.unwrap(), bin);

        let cached = cache
            .get(&namespace().bin_key("acct-a", bin.id))
            .await
            .unwrap()
            .expect("bin should be cached after a read");
        assert_eq!(deserialize_bin(&cached).unwrap(), bin);
    }
}
