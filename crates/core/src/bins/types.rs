use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named container for incoming webhook payloads, owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bin {
    pub id: Uuid,
    pub title: String,
    /// Tenant that owns this bin. Every lookup is scoped by it.
    pub account_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bin {
    /// Creates a new bin with a fresh ID, stamped with the current time.
    pub fn new(account_id: impl Into<String>, title: impl Into<String>) -> Self {
        let now = Self::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            account_id: account_id.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Current time truncated to microseconds, the precision stores keep.
    pub fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }

    /// Applies the mutable fields of a patch and refreshes `updated_at`.
    ///
    /// `id`, `account_id` and `created_at` are never touched.
    pub fn apply(&mut self, patch: &BinPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        self.updated_at = now;
    }

    /// Sets a specific ID for this bin (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets the creation timestamp.
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the last-updated timestamp.
    pub fn with_updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }
}

/// Caller-supplied fields for a bin that does not exist yet.
///
/// The store assigns `id` and both timestamps; the owning account is passed
/// alongside the draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBin {
    pub title: String,
}

impl NewBin {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    /// Turns the draft into a stored record for `account_id`.
    pub fn into_bin(self, account_id: impl Into<String>) -> Bin {
        Bin::new(account_id, self.title)
    }
}

/// The mutable subset of a bin.
///
/// There is no way to express `id`, `account_id` or
/// `created_at` here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl BinPatch {
    /// Creates an empty patch. Applying it only refreshes `updated_at`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the new title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
