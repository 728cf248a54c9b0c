use thiserror::Error;

use crate::bins::BinError;
use crate::cache::{CacheError, SerializationError};

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// The store or cache backend could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Cache error: {0}")]
    Cache(String),
}

impl RepositoryError {
    /// Shorthand for a missing bin.
    pub fn bin_not_found(id: impl ToString) -> Self {
        RepositoryError::NotFound {
            entity_type: "Bin",
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }

    /// True when a backend was unreachable rather than the request being wrong.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RepositoryError::ConnectionFailed(_))
    }
}

impl From<CacheError> for RepositoryError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::ConnectionFailed(msg) => RepositoryError::ConnectionFailed(msg),
            CacheError::Serialization(msg) => RepositoryError::Serialization(msg),
            other => RepositoryError::Cache(other.to_string()),
        }
    }
}

impl From<SerializationError> for RepositoryError {
    fn from(err: SerializationError) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

impl From<BinError> for RepositoryError {
    fn from(err: BinError) -> Self {
        RepositoryError::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Rejects a blank account id. Every bin operation is account scoped.
pub fn require_account(account_id: &str) -> Result<()> {
    if account_id.trim().is_empty() {
        return Err(RepositoryError::InvalidData(
            "account id is required".to_string(),
        ));
    }
    Ok(())
}

/// Turns a zero affected-row count into a not-found error.
///
/// Stores and the caching repository report zero-effect mutations as
/// `Ok(0)`; callers that expose those mutations use this to decide.
pub fn ensure_affected(affected: u64, id: impl ToString) -> Result<u64> {
    if affected == 0 {
        Err(RepositoryError::bin_not_found(id))
    } else {
        Ok(affected)
    }
}
