//! Guestbook Entry Model
//!
//! The persisted record. Ids and timestamps are assigned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Entry ==
/// A single guestbook entry, as stored in the `entries` table.
///
/// Entries are never mutated or deleted once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entry {
    /// Store-assigned, monotonic identifier
    pub id: i32,
    /// Author name
    pub name: String,
    /// Message body
    pub message: String,
    /// Store-assigned creation time
    pub created_at: DateTime<Utc>,
}
