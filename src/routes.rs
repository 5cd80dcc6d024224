//! Router and middleware composition.
//!
//! # Route Structure
//!
//! - `GET /health`           - liveness (public)
//! - `GET /api/v1/`          - liveness (public, kept from the original layout)
//! - `/api/v1/books*`        - catalog CRUD (API key; create also needs a bearer token)
//! - `POST /api/v1/login`    - credential exchange (API key)
//! - `POST /api/v1/register` - registration (API key)
//!
//! # Middleware
//!
//! Outermost first: security headers (production only) → CORS → shared rate
//! limit → audit log → per-route API-key gate. The bearer gate on
//! `POST /books` is the [`crate::api::extract::AuthUser`] extractor.

use axum::routing::{get, post};
use axum::{Router, middleware};

use crate::api::handlers::{
    create_book_handler, delete_book_handler, get_book_handler, healthcheck_handler,
    list_books_handler, login_handler, register_handler, update_book_handler,
};
use crate::api::middleware::{api_key, audit, cors, rate_limit, security};
use crate::state::AppState;

/// Environment-dependent knobs for router construction.
#[derive(Debug, Clone, Default)]
pub struct RouterConfig {
    /// Enables the security-header middleware.
    pub production: bool,
    /// Extra allowed CORS origin for the production frontend.
    pub allowed_origin: Option<String>,
}

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState, config: &RouterConfig) -> Router {
    let protected = Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
        .route("/login", post(login_handler))
        .route("/register", post(register_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api_key::layer,
        ));

    let v1 = Router::new()
        .route("/", get(healthcheck_handler))
        .merge(protected);

    let mut router = Router::new()
        .route("/health", get(healthcheck_handler))
        .nest("/api/v1", v1)
        .with_state(state)
        .layer(middleware::from_fn(audit::layer))
        .layer(rate_limit::layer())
        .layer(cors::layer(config.allowed_origin.as_deref()));

    if config.production {
        router = router.layer(middleware::from_fn(security::headers));
    }

    router
}
