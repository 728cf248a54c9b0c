mod error;
mod operations;
mod types;

pub use error::BinError;
pub use operations::{validate_new_bin, validate_patch, validate_title, MAX_TITLE_LEN};
pub use types::{Bin, BinPatch, NewBin};
