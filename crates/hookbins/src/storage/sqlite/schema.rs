//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite repository,
//! following the Functional Core pattern - pure data, no I/O.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Bins table
CREATE TABLE IF NOT EXISTS bins (
    id TEXT PRIMARY KEY,
    account_id TEXT NOT NULL,
    title TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Every query filters by account
CREATE INDEX IF NOT EXISTS idx_bins_account_created ON bins(account_id, created_at);
"#;

pub const INSERT_BIN: &str = r#"
INSERT INTO bins (id, account_id, title, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_BIN_BY_ID: &str = r#"
SELECT id, account_id, title, created_at, updated_at
FROM bins
WHERE id = ?1 AND account_id = ?2
"#;

/// Insertion order: `created_at` ties are broken by rowid.
pub const SELECT_BINS_BY_ACCOUNT: &str = r#"
SELECT id, account_id, title, created_at, updated_at
FROM bins
WHERE account_id = ?1
ORDER BY created_at ASC, rowid ASC
LIMIT ?2 OFFSET ?3
"#;

/// Absent patch fields keep their stored value. `id`, `account_id` and
/// `created_at` are never written.
pub const UPDATE_BIN: &str = r#"
UPDATE bins
SET title = COALESCE(?3, title), updated_at = ?4
WHERE id = ?1 AND account_id = ?2
"#;

pub const DELETE_BIN: &str = r#"
DELETE FROM bins
WHERE id = ?1 AND account_id = ?2
"#;

pub const DELETE_BINS_BY_ACCOUNT: &str = r#"
DELETE FROM bins
WHERE account_id = ?1
"#;
