//! In-memory repository adapters.
//!
//! Fake backends implementing the same capability traits as the PostgreSQL
//! adapters, used by the integration test suite. Rows live in insertion
//! order, which stands in for the database's storage order when no sort is
//! requested.

use async_trait::async_trait;
use chrono::Utc;
use std::cmp::Ordering;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::entities::{Book, BookPatch, NewBook, NewUser, User};
use crate::domain::pagination::{PageParams, SortOrder};
use crate::domain::repositories::{BookFilter, BookRepository, UserRepository};
use crate::error::AppError;

#[derive(Default)]
pub struct InMemoryBookRepository {
    rows: Mutex<Vec<Book>>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn window(rows: Vec<Book>, offset: i64, limit: i64) -> Vec<Book> {
        rows.into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect()
    }

    /// Orders by the known sortable fields; unknown sort fields leave the
    /// insertion order untouched (the real adapter would fail the query
    /// instead — close enough for a fake).
    fn sort(rows: &mut [Book], sort: &str, order: SortOrder) {
        let cmp: fn(&Book, &Book) -> Ordering = match sort {
            "title" => |a, b| a.title.cmp(&b.title),
            "author" => |a, b| a.author.cmp(&b.author),
            "created_at" => |a, b| a.created_at.cmp(&b.created_at),
            "updated_at" => |a, b| a.updated_at.cmp(&b.updated_at),
            _ => return,
        };

        rows.sort_by(cmp);
        if order == SortOrder::Desc {
            rows.reverse();
        }
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Book>, AppError> {
        let rows = self.rows.lock().unwrap().clone();
        Ok(Self::window(rows, offset, limit))
    }

    async fn query(
        &self,
        filter: &BookFilter,
        page: &PageParams,
    ) -> Result<(Vec<Book>, i64), AppError> {
        let mut rows: Vec<Book> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|book| {
                filter
                    .author
                    .as_deref()
                    .is_none_or(|author| book.author == author)
                    && filter.title.as_deref().is_none_or(|title| {
                        book.title.to_lowercase().contains(&title.to_lowercase())
                    })
            })
            .cloned()
            .collect();

        let total = rows.len() as i64;

        if let Some(sort) = page.sort.as_deref() {
            Self::sort(&mut rows, sort, page.order);
        }

        Ok((Self::window(rows, page.offset(), page.page_size), total))
    }

    async fn create(&self, new_book: NewBook) -> Result<Book, AppError> {
        let now = Utc::now();
        let book = Book {
            id: Uuid::new_v4(),
            title: new_book.title,
            author: new_book.author,
            created_at: now,
            updated_at: now,
        };

        self.rows.lock().unwrap().push(book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Book>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|book| book.id == id)
            .cloned())
    }

    async fn update(&self, id: Uuid, patch: BookPatch) -> Result<Book, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let book = rows
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or_else(|| {
                AppError::not_found("Book not found", format!("no book with id {id}"))
            })?;

        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(author) = patch.author {
            book.author = author;
        }
        book.updated_at = Utc::now();

        Ok(book.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|book| book.id != id);
        Ok(rows.len() < before)
    }
}

#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut rows = self.rows.lock().unwrap();

        if rows.iter().any(|user| user.username == new_user.username) {
            return Err(AppError::conflict(
                "Username already exists",
                format!("username {:?} is taken", new_user.username),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            password_hash: new_user.password_hash,
            created_at: now,
            updated_at: now,
        };

        rows.push(user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }
}
