use std::sync::Arc;

use crate::application::services::{AuthService, BookService, UserService};

/// Shared application state injected into every handler.
///
/// Services are constructed once at boot ([`crate::server::run`]) around
/// trait-object repository and cache handles, so tests can swap in the
/// in-memory adapters without touching the routing layer.
#[derive(Clone)]
pub struct AppState {
    pub book_service: Arc<BookService>,
    pub user_service: Arc<UserService>,
    pub auth_service: Arc<AuthService>,
}
