//! API-key authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{error::AppError, state::AppState};

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects any request whose `X-API-Key` header does not match the
/// configured secret. The comparison runs in constant time (see
/// [`crate::application::services::AuthService::verify_api_key`]).
///
/// A missing header is treated like a wrong key: same 401, same detail.
pub async fn layer(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let presented = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if !state.auth_service.verify_api_key(presented) {
        return Err(AppError::unauthorized("Unauthorized", "Invalid API Key"));
    }

    Ok(next.run(req).await)
}
