#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use bookshelf::application::services::{AuthService, BookService, UserService};
use bookshelf::domain::repositories::{BookRepository, UserRepository};
use bookshelf::infrastructure::cache::MemoryCache;
use bookshelf::infrastructure::persistence::{InMemoryBookRepository, InMemoryUserRepository};
use bookshelf::routes::{RouterConfig, app_router};
use bookshelf::state::AppState;
use serde_json::{Value, json};

pub const TEST_API_KEY: &str = "test-api-key";
pub const TEST_JWT_SECRET: &str = "test-jwt-secret";

/// Builds an application state over the in-memory adapters and a real
/// (storing) cache.
pub fn test_state() -> AppState {
    let book_repository: Arc<dyn BookRepository> = Arc::new(InMemoryBookRepository::new());
    let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let cache = Arc::new(MemoryCache::new());

    let auth_service = Arc::new(AuthService::new(TEST_API_KEY, TEST_JWT_SECRET));
    let book_service = Arc::new(BookService::new(book_repository, cache, 60));
    let user_service = Arc::new(UserService::new(user_repository, auth_service.clone()));

    AppState {
        book_service,
        user_service,
        auth_service,
    }
}

pub fn make_server_with_state() -> (TestServer, AppState) {
    let state = test_state();
    let server = TestServer::new(app_router(state.clone(), &RouterConfig::default())).unwrap();
    (server, state)
}

pub fn make_server() -> TestServer {
    make_server_with_state().0
}

/// Server with production mode enabled (security headers active).
pub fn make_production_server() -> TestServer {
    let config = RouterConfig {
        production: true,
        allowed_origin: Some("https://books.example.com".to_string()),
    };
    TestServer::new(app_router(test_state(), &config)).unwrap()
}

/// Registers a user and exchanges the credentials for a bearer token.
pub async fn register_and_login(server: &TestServer, username: &str, password: &str) -> String {
    server
        .post("/api/v1/register")
        .add_header("X-API-Key", TEST_API_KEY)
        .json(&json!({ "username": username, "password": password }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/v1/login")
        .add_header("X-API-Key", TEST_API_KEY)
        .json(&json!({ "username": username, "password": password }))
        .await;
    response.assert_status_ok();

    response.json::<Value>()["data"]["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Creates a book through the API and returns its generated id.
pub async fn create_book(server: &TestServer, token: &str, title: &str, author: &str) -> String {
    let response = server
        .post("/api/v1/books")
        .add_header("X-API-Key", TEST_API_KEY)
        .add_header("Authorization", format!("Bearer {token}"))
        .json(&json!({ "title": title, "author": author }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    response.json::<Value>()["data"]["id"]
        .as_str()
        .expect("created book carries an id")
        .to_string()
}
