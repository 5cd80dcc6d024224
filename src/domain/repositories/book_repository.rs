//! Repository trait for book catalog data access.

use crate::domain::entities::{Book, BookPatch, NewBook};
use crate::domain::pagination::PageParams;
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Optional predicate for filtered listing queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Exact author match.
    pub author: Option<String>,
    /// Case-insensitive title substring match.
    pub title: Option<String>,
}

impl BookFilter {
    pub fn is_empty(&self) -> bool {
        self.author.is_none() && self.title.is_none()
    }
}

/// Repository interface for the book catalog.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryBookRepository`] - fake backend for tests
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists books with a raw offset/limit window, in storage order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Book>, AppError>;

    /// Generic filtered + paginated query: returns the page of rows and the
    /// total row count matching the filter.
    ///
    /// The order clause comes from [`PageParams::order_clause`]; no ORDER BY
    /// is applied when the sort field is unset.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn query(
        &self,
        filter: &BookFilter,
        page: &PageParams,
    ) -> Result<(Vec<Book>, i64), AppError>;

    /// Inserts a new book; the database assigns id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_book: NewBook) -> Result<Book, AppError>;

    /// Finds a book by its identifier.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Book))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, AppError>;

    /// Applies a sparse merge: only `Some` patch fields overwrite columns,
    /// `updated_at` is bumped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no book matches `id`.
    async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book, AppError>;

    /// Hard-deletes a book. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
