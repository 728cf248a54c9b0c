use thiserror::Error;

/// Errors that can occur when validating a bin.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BinError {
    #[error("Bin title cannot be empty")]
    EmptyTitle,
    #[error("Bin title too long (max 255 characters)")]
    TitleTooLong,
}
