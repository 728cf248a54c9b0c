//! SQLite repository implementation.
//!
//! Implements `BinStore` from `hookbins_core::storage` using SQLite.

use std::time::Duration;

use async_trait::async_trait;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use hookbins_core::bins::{Bin, BinPatch, NewBin};
use hookbins_core::storage::{require_account, BinStore, RepositoryError, Result};

use super::conversions::{format_datetime, row_to_bin};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// How long a statement waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based bin store.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;
        tracing::debug!(%path, "Opened SQLite store");

        Ok(Self { conn })
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema. Safe to run repeatedly.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.busy_timeout(BUSY_TIMEOUT).map_err(wrap_err)?;
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl BinStore for SqliteRepository {
    async fn list_bins(&self, account_id: &str, offset: i64, limit: i64) -> Result<Vec<Bin>> {
        require_account(account_id)?;
        let account_id = account_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_BINS_BY_ACCOUNT)
                    .map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params![account_id, limit, offset], row_to_bin)
                    .map_err(wrap_err)?;

                let mut bins = Vec::new();
                for row_result in rows {
                    bins.push(row_result.map_err(wrap_err)?);
                }
                Ok(bins)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn get_bin(&self, account_id: &str, id: Uuid) -> Result<Option<Bin>> {
        require_account(account_id)?;
        let id_str = id.to_string();
        let account_id = account_id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_BIN_BY_ID).map_err(wrap_err)?;
                match stmt.query_row([&id_str, &account_id], row_to_bin) {
                    Ok(bin) => Ok(Some(bin)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn create_bin(&self, account_id: &str, draft: &NewBin) -> Result<Bin> {
        require_account(account_id)?;
        let bin = draft.clone().into_bin(account_id);

        let id = bin.id.to_string();
        let account_id = bin.account_id.clone();
        let title = bin.title.clone();
        let created_at = format_datetime(&bin.created_at);
        let updated_at = format_datetime(&bin.updated_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_BIN,
                    rusqlite::params![id, account_id, title, created_at, updated_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(map_tokio_rusqlite_error)?;

        Ok(bin)
    }

    async fn update_bin(&self, account_id: &str, id: Uuid, patch: &BinPatch) -> Result<u64> {
        require_account(account_id)?;
        let id = id.to_string();
        let account_id = account_id.to_string();
        let title = patch.title.clone();
        let updated_at = format_datetime(&Bin::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_BIN,
                        rusqlite::params![id, account_id, title, updated_at],
                    )
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn delete_bin(&self, account_id: &str, id: Uuid) -> Result<u64> {
        require_account(account_id)?;
        let id = id.to_string();
        let account_id = account_id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_BIN, [&id, &account_id])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn destroy_bins(&self, account_id: &str) -> Result<u64> {
        require_account(account_id)?;
        let account_id = account_id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_BINS_BY_ACCOUNT, [&account_id])
                    .map_err(wrap_err)?;
                Ok(rows as u64)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}
