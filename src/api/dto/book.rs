//! DTOs for book endpoints.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::BookPatch;

/// Request body for `POST /api/v1/books`. Both fields are required.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,

    #[validate(length(min = 1, message = "author must not be empty"))]
    pub author: String,
}

/// Request body for `PUT /api/v1/books/{id}`.
///
/// A sparse merge: absent or empty fields leave the stored value unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
}

impl UpdateBookRequest {
    /// Normalizes empty strings to "unset" so the merge only applies
    /// non-empty incoming fields.
    pub fn into_patch(self) -> BookPatch {
        BookPatch {
            title: self.title.filter(|t| !t.is_empty()),
            author: self.author.filter(|a| !a.is_empty()),
        }
    }
}
