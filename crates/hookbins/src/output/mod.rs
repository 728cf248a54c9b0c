//! Output formatting functions.

pub mod pretty;

use serde::Serialize;

/// Format a value as compact JSON, one document per line.
pub fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Result of a mutation, as printed in JSON mode.
#[derive(Debug, Serialize)]
pub struct Affected {
    pub affected: u64,
}
