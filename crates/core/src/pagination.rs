//! Pagination policy for list queries.
//!
//! Raw `(page, limit)` values come straight from callers and are never
//! trusted. They are clamped here before any store sees them.

use serde::{Deserialize, Serialize};

/// Smallest page size a list query may request.
pub const MIN_LIMIT: i64 = 1;

/// Largest page size a list query may request.
pub const MAX_LIMIT: i64 = 100;

/// Page size used when a caller does not ask for one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Per-request list options. `page` is zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOpts {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for QueryOpts {
    fn default() -> Self {
        Self {
            page: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl QueryOpts {
    pub fn new(page: i64, limit: i64) -> Self {
        Self { page, limit }
    }

    /// Returns a copy with `page` and `limit` clamped.
    ///
    /// Normalizing an already-normalized value returns it unchanged.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(0),
            limit: self.limit.clamp(MIN_LIMIT, MAX_LIMIT),
        }
    }

    /// The clamped page size.
    pub fn limit(&self) -> i64 {
        self.normalized().limit
    }

    /// Rows to skip, computed from the clamped page and the clamped limit.
    pub fn offset(&self) -> i64 {
        let opts = self.normalized();
        opts.page.saturating_mul(opts.limit)
    }

    /// The `(offset, limit)` window a store should read.
    pub fn window(&self) -> (i64, i64) {
        (self.offset(), self.limit())
    }
}

/// Turns raw `(page, limit)` into a clamped `(offset, limit)` pair.
///
/// Total and pure: every input maps to a valid window.
///
/// # Examples
///
/// ```
/// use hookbins_core::pagination::normalize;
///
/// assert_eq!(normalize(2, 10), (20, 10));
/// assert_eq!(normalize(0, -1), (0, 1));
/// assert_eq!(normalize(-3, 500), (0, 100));
/// ```
pub fn normalize(page: i64, limit: i64) -> (i64, i64) {
    QueryOpts::new(page, limit).window()
}
