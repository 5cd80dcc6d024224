//! User entity for authentication.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user.
///
/// Deliberately does NOT derive `Serialize`: the password hash must never
/// appear in a response body. Handlers convert to
/// [`crate::api::dto::user::UserResponse`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a user. The password is already hashed by the
/// service layer when this reaches a repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
