//! Handlers for registration and login.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::user::{LoginRequest, RegisterRequest, TokenResponse, UserResponse};
use crate::api::extract::AppJson;
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /api/v1/register` — 201 on success, 409 when the username is taken.
pub async fn register_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), AppError> {
    payload.validate()?;

    let user = state
        .user_service
        .register(payload.username, payload.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "User registered successfully",
            UserResponse::from(user),
        )),
    ))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/v1/login` — a wrong password and an unknown username answer
/// the same 401.
pub async fn login_handler(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenResponse>>), AppError> {
    payload.validate()?;

    let token = state
        .user_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Login successful", TokenResponse { token })),
    ))
}
