//! PostgreSQL implementation of the book repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Book, BookPatch, NewBook};
use crate::domain::pagination::PageParams;
use crate::domain::repositories::{BookFilter, BookRepository};
use crate::error::AppError;

const BOOK_COLUMNS: &str = "id, title, author, created_at, updated_at";

/// PostgreSQL repository for the book catalog.
///
/// Uses the sqlx runtime API: the filtered query interpolates a
/// caller-controlled ORDER BY clause (the sort field is deliberately not
/// checked against a column allow-list), so the statements are built at
/// request time. Filter values are always bound, never interpolated.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
        let mut has_where = false;

        if let Some(author) = &filter.author {
            qb.push(" WHERE author = ");
            qb.push_bind(author.clone());
            has_where = true;
        }

        if let Some(title) = &filter.title {
            qb.push(if has_where { " AND " } else { " WHERE " });
            qb.push("title ILIKE ");
            qb.push_bind(format!("%{}%", title));
        }
    }
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Book>, AppError> {
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, created_at, updated_at FROM books LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(books)
    }

    async fn query(
        &self,
        filter: &BookFilter,
        page: &PageParams,
    ) -> Result<(Vec<Book>, i64), AppError> {
        let mut count_qb = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM books");
        Self::push_filter(&mut count_qb, filter);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(self.pool.as_ref())
            .await?;

        let mut qb =
            QueryBuilder::<Postgres>::new(format!("SELECT {} FROM books", BOOK_COLUMNS));
        Self::push_filter(&mut qb, filter);

        if let Some(clause) = page.order_clause() {
            qb.push(format!(" ORDER BY {}", clause));
        }

        qb.push(" LIMIT ");
        qb.push_bind(page.page_size);
        qb.push(" OFFSET ");
        qb.push_bind(page.offset());

        let books = qb
            .build_query_as::<Book>()
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok((books, total))
    }

    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "INSERT INTO books (title, author) VALUES ($1, $2) \
             RETURNING id, title, author, created_at, updated_at",
        )
        .bind(new_book.title)
        .bind(new_book.author)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(book)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, created_at, updated_at FROM books WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(book)
    }

    async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book, AppError> {
        let book = sqlx::query_as::<_, Book>(
            "UPDATE books \
             SET title = COALESCE($2, title), \
                 author = COALESCE($3, author), \
                 updated_at = now() \
             WHERE id = $1 \
             RETURNING id, title, author, created_at, updated_at",
        )
        .bind(id)
        .bind(patch.title)
        .bind(patch.author)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("Book not found", format!("no book with id {id}")))?;

        Ok(book)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
