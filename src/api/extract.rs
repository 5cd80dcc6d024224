//! Crate-local extractors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::Json;
use serde::de::DeserializeOwned;

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor whose rejection is the standard response envelope.
///
/// Behaves like [`axum::Json`] but translates malformed or missing bodies
/// into a 400 `{"success": false, "message": "Invalid request body", ...}`.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(AppError::bad_request(
                "Invalid request body",
                rejection_detail(rejection),
            )),
        }
    }
}

fn rejection_detail(rejection: JsonRejection) -> String {
    match rejection {
        JsonRejection::JsonDataError(e) => e.body_text(),
        JsonRejection::JsonSyntaxError(e) => e.body_text(),
        JsonRejection::MissingJsonContentType(_) => {
            "expected request with `Content-Type: application/json`".to_string()
        }
        other => other.body_text(),
    }
}

/// Bearer-token gate as a typed extractor.
///
/// Handlers that take an `AuthUser` argument require a valid
/// `Authorization: Bearer <token>` header; the decoded username is handed to
/// the handler. The failure modes are distinguished in the 401 detail:
/// missing header, malformed scheme, invalid signature, expired or otherwise
/// invalid claims.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", "Authorization header missing")
            })?;

        let value = header.to_str().map_err(|_| {
            AppError::unauthorized("Unauthorized", "Invalid authorization header format")
        })?;

        let token = value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Unauthorized", "Invalid authorization header format")
        })?;

        let claims = state.auth_service.verify_token(token)?;

        Ok(Self {
            username: claims.sub,
        })
    }
}
