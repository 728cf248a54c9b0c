//! In-memory repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use hookbins_core::bins::{Bin, BinPatch, NewBin};
use hookbins_core::storage::{require_account, BinStore, Result};

/// In-memory storage backend for testing.
///
/// Bins live in a `Vec` wrapped in `Arc<RwLock<_>>`, kept in creation order
/// so listing matches the SQLite store. Data is not persisted and will be
/// lost when the repository is dropped.
#[derive(Debug, Clone)]
pub struct InMemoryRepository {
    bins: Arc<RwLock<Vec<Bin>>>,
}

impl Default for InMemoryRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            bins: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

fn owned_by(bin: &Bin, account_id: &str, id: Uuid) -> bool {
    bin.id == id && bin.account_id == account_id
}

#[async_trait]
impl BinStore for InMemoryRepository {
    async fn list_bins(&self, account_id: &str, offset: i64, limit: i64) -> Result<Vec<Bin>> {
        require_account(account_id)?;
        let offset = usize::try_from(offset).unwrap_or(0);
        let limit = usize::try_from(limit).unwrap_or(0);

        let bins = self.bins.read().await;
        Ok(bins
            .iter()
            .filter(|b| b.account_id == account_id)
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_bin(&self, account_id: &str, id: Uuid) -> Result<Option<Bin>> {
        require_account(account_id)?;
        let bins = self.bins.read().await;
        Ok(bins.iter().find(|b| owned_by(b, account_id, id)).cloned())
    }

    async fn create_bin(&self, account_id: &str, draft: &NewBin) -> Result<Bin> {
        require_account(account_id)?;
        let bin = draft.clone().into_bin(account_id);

        let mut bins = self.bins.write().await;
        bins.push(bin.clone());
        Ok(bin)
    }

    async fn update_bin(&self, account_id: &str, id: Uuid, patch: &BinPatch) -> Result<u64> {
        require_account(account_id)?;
        let mut bins = self.bins.write().await;
        match bins.iter_mut().find(|b| owned_by(b, account_id, id)) {
            Some(bin) => {
                bin.apply(patch, Bin::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_bin(&self, account_id: &str, id: Uuid) -> Result<u64> {
        require_account(account_id)?;
        let mut bins = self.bins.write().await;
        let before = bins.len();
        bins.retain(|b| !owned_by(b, account_id, id));
        Ok((before - bins.len()) as u64)
    }

    async fn destroy_bins(&self, account_id: &str) -> Result<u64> {
        require_account(account_id)?;
        let mut bins = self.bins.write().await;
        let before = bins.len();
        bins.retain(|b| b.account_id != account_id);
        Ok((before - bins.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookbins_core::storage::RepositoryError;
    use std::time::Duration;

    #[tokio::test]
    async fn test_bin_create_and_get() {
        let repo = InMemoryRepository::new();

        let bin = repo.create_bin("acct-1", &NewBin::new("Hooks")).await.unwrap();

        let retrieved = repo.get_bin("acct-1", bin.id).await.unwrap();
        assert_eq!(retrieved, Some(bin));
    }

    #[tokio::test]
    async fn test_bin_get_nonexistent() {
        let repo = InMemoryRepository::new();

        let result = repo.get_bin("acct-1", Uuid::new_v4()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_bin_get_other_account() {
        let repo = InMemoryRepository::new();
        let bin = repo.create_bin("acct-1", &NewBin::new("Hooks")).await.unwrap();

        assert!(repo.get_bin("acct-2", bin.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_bin_update() {
        let repo = InMemoryRepository::new();
        let bin = repo.create_bin("acct-1", &NewBin::new("Original")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(2)).await;

        let affected = repo
            .update_bin("acct-1", bin.id, &BinPatch::new().with_title("Updated"))
            .await
            .unwrap();

        assert_eq!(affected, 1);
        let retrieved = repo.get_bin("acct-1", bin.id).await.unwrap().unwrap();
        assert_eq!(retrieved.title, "Updated");
        assert_eq!(retrieved.created_at, bin.created_at);
        assert!(retrieved.updated_at > bin.updated_at);
    }

    #[tokio::test]
    async fn test_bin_update_nonexistent() {
        let repo = InMemoryRepository::new();

        let affected = repo
            .update_bin("acct-1", Uuid::new_v4(), &BinPatch::new().with_title("x"))
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_bin_delete() {
        let repo = InMemoryRepository::new();
        let bin = repo.create_bin("acct-1", &NewBin::new("Doomed")).await.unwrap();

        assert_eq!(repo.delete_bin("acct-2", bin.id).await.unwrap(), 0);
        assert_eq!(repo.delete_bin("acct-1", bin.id).await.unwrap(), 1);
        assert!(repo.get_bin("acct-1", bin.id).await.unwrap().is_none());
        assert_eq!(repo.delete_bin("acct-1", bin.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_preserves_creation_order_and_window() {
        let repo = InMemoryRepository::new();
        for i in 0..5 {
            repo.create_bin("acct-1", &NewBin::new(format!("Bin {i}")))
                .await
                .unwrap();
            repo.create_bin("acct-2", &NewBin::new(format!("Other {i}")))
                .await
                .unwrap();
        }

        let page: Vec<String> = repo
            .list_bins("acct-1", 1, 3)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();

        assert_eq!(page, vec!["Bin 1", "Bin 2", "Bin 3"]);
        assert!(repo.list_bins("acct-1", 10, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_destroy_bins() {
        let repo = InMemoryRepository::new();
        for i in 0..3 {
            repo.create_bin("acct-1", &NewBin::new(format!("Bin {i}")))
                .await
                .unwrap();
        }
        repo.create_bin("acct-2", &NewBin::new("Keep")).await.unwrap();

        assert_eq!(repo.destroy_bins("acct-1").await.unwrap(), 3);
        assert!(repo.list_bins("acct-1", 0, 10).await.unwrap().is_empty());
        assert_eq!(repo.list_bins("acct-2", 0, 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_account_is_rejected() {
        let repo = InMemoryRepository::new();

        let result = repo.create_bin(" ", &NewBin::new("x")).await;
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }
}
