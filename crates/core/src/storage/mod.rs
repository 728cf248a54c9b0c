mod error;
mod traits;

pub use error::{ensure_affected, require_account, RepositoryError, Result};
pub use traits::{BinRepository, BinStore};
