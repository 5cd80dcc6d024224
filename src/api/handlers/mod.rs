//! HTTP request handlers for API endpoints.

pub mod books;
pub mod health;
pub mod users;

pub use books::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    update_book_handler,
};
pub use health::healthcheck_handler;
pub use users::{login_handler, register_handler};
