use super::error::BinError;
use super::types::{BinPatch, NewBin};

/// Longest title a bin may carry, in characters.
pub const MAX_TITLE_LEN: usize = 255;

/// Validates a bin title: required and bounded.
pub fn validate_title(title: &str) -> Result<(), BinError> {
    if title.trim().is_empty() {
        return Err(BinError::EmptyTitle);
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(BinError::TitleTooLong);
    }
    Ok(())
}

/// Validates a bin draft before creation.
pub fn validate_new_bin(draft: &NewBin) -> Result<(), BinError> {
    validate_title(&draft.title)
}

/// Validates a patch before it is applied. Absent fields are always valid.
pub fn validate_patch(patch: &BinPatch) -> Result<(), BinError> {
    match &patch.title {
        Some(title) => validate_title(title),
        None => Ok(()),
    }
}
