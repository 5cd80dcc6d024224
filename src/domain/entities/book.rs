//! Book entity for the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A catalog entry.
///
/// The identifier is assigned by the database on insert and never changes.
/// `Serialize`/`Deserialize` are derived because listing results round-trip
/// through the cache as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a book. Both fields are required and non-empty.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
}

/// Sparse update for an existing book.
///
/// `None` fields are left unchanged. Empty strings are normalized to `None`
/// before this type reaches the repository, so a `PUT` with `{"title": ""}`
/// keeps the stored title.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl BookPatch {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none()
    }
}
