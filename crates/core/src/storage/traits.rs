use async_trait::async_trait;
use uuid::Uuid;

use crate::bins::{Bin, BinPatch, NewBin};
use crate::pagination::QueryOpts;

use super::Result;

/// Durable store for bins.
///
/// Every operation is scoped by `account_id`: a bin owned by another
/// account is indistinguishable from one that does not exist. Mutations
/// report affected rows and return `Ok(0)` when nothing matched.
#[async_trait]
pub trait BinStore: Send + Sync {
    /// Lists an account's bins in creation order, sliced to `[offset, offset + limit)`.
    ///
    /// An account with no bins, or an offset past the end, yields an empty list.
    async fn list_bins(&self, account_id: &str, offset: i64, limit: i64) -> Result<Vec<Bin>>;

    /// Gets a bin by ID, only if it belongs to `account_id`.
    async fn get_bin(&self, account_id: &str, id: Uuid) -> Result<Option<Bin>>;

    /// Persists a new bin, assigning its ID and timestamps.
    async fn create_bin(&self, account_id: &str, draft: &NewBin) -> Result<Bin>;

    /// Applies the mutable fields of `patch` and refreshes `updated_at`.
    async fn update_bin(&self, account_id: &str, id: Uuid, patch: &BinPatch) -> Result<u64>;

    /// Deletes a single bin.
    async fn delete_bin(&self, account_id: &str, id: Uuid) -> Result<u64>;

    /// Deletes every bin owned by the account.
    async fn destroy_bins(&self, account_id: &str) -> Result<u64>;
}

/// The CRUD contract callers use for bins.
#[async_trait]
pub trait BinRepository: Send + Sync {
    /// Lists a page of the account's bins. `opts` is clamped before use.
    async fn get_all(&self, account_id: &str, opts: QueryOpts) -> Result<Vec<Bin>>;

    /// Gets a bin, failing with `NotFound` when the account does not own it.
    async fn get(&self, account_id: &str, id: Uuid) -> Result<Bin>;

    /// Creates a bin and returns the stored record.
    async fn create(&self, account_id: &str, draft: &NewBin) -> Result<Bin>;

    /// Updates a bin and returns the affected count.
    async fn update(&self, account_id: &str, id: Uuid, patch: &BinPatch) -> Result<u64>;

    /// Deletes a bin and returns the affected count.
    async fn delete(&self, account_id: &str, id: Uuid) -> Result<u64>;

    /// Deletes all of the account's bins and returns the affected count.
    async fn destroy(&self, account_id: &str) -> Result<u64>;
}
