//! Registration and login.

use std::sync::Arc;

use crate::application::services::AuthService;
use crate::domain::entities::{NewUser, User};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// The one 401 both failed-login paths share. A caller cannot tell a wrong
/// password from an unknown username.
const INVALID_CREDENTIALS: (&str, &str) = ("Unauthorized", "Invalid username or password");

pub struct UserService {
    repository: Arc<dyn UserRepository>,
    auth: Arc<AuthService>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, auth: Arc<AuthService>) -> Self {
        Self { repository, auth }
    }

    /// Registers a new user, hashing the password with bcrypt before it
    /// reaches storage.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] for a duplicate username (propagated
    /// from the storage unique index) and [`AppError::Internal`] if hashing
    /// fails.
    pub async fn register(&self, username: String, password: String) -> Result<User, AppError> {
        let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST).map_err(|e| {
            tracing::error!(error = %e, "password hashing failed");
            AppError::internal("Failed to register user", "internal error")
        })?;

        self.repository
            .create(NewUser {
                username,
                password_hash,
            })
            .await
    }

    /// Verifies credentials and issues a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with an identical message for an
    /// unknown username and a wrong password.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized(INVALID_CREDENTIALS.0, INVALID_CREDENTIALS.1)
            })?;

        let verified = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !verified {
            return Err(AppError::unauthorized(
                INVALID_CREDENTIALS.0,
                INVALID_CREDENTIALS.1,
            ));
        }

        self.auth.issue_token(&user.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUserRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn auth() -> Arc<AuthService> {
        Arc::new(AuthService::new("test-api-key", "test-jwt-secret"))
    }

    fn stored_user(username: &str, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .withf(|new_user| {
                new_user.username == "alice"
                    && new_user.password_hash != "s3cret"
                    && bcrypt::verify("s3cret", &new_user.password_hash).unwrap()
            })
            .times(1)
            .returning(|new_user| {
                Ok(User {
                    id: Uuid::new_v4(),
                    username: new_user.username,
                    password_hash: new_user.password_hash,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let service = UserService::new(Arc::new(repo), auth());
        let user = service
            .register("alice".to_string(), "s3cret".to_string())
            .await
            .unwrap();

        assert_eq!(user.username, "alice");
    }

    #[tokio::test]
    async fn test_login_success_returns_verifiable_token() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|_| Ok(Some(stored_user("alice", "s3cret"))));

        let auth = auth();
        let service = UserService::new(Arc::new(repo), auth.clone());

        let token = service.login("alice", "s3cret").await.unwrap();
        let claims = auth.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "alice");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_username()
            .returning(|username| match username {
                "alice" => Ok(Some(stored_user("alice", "s3cret"))),
                _ => Ok(None),
            });

        let service = UserService::new(Arc::new(repo), auth());

        let wrong_password = service.login("alice", "wrong").await.unwrap_err();
        let unknown_user = service.login("nobody", "whatever").await.unwrap_err();

        // Same variant, same message, same detail: no account enumeration.
        match (wrong_password, unknown_user) {
            (
                AppError::Unauthorized {
                    message: m1,
                    detail: d1,
                },
                AppError::Unauthorized {
                    message: m2,
                    detail: d2,
                },
            ) => {
                assert_eq!(m1, m2);
                assert_eq!(d1, d2);
            }
            other => panic!("expected two Unauthorized errors, got {:?}", other),
        }
    }
}
