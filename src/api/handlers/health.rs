//! Liveness endpoint.

use axum::Json;

use crate::api::response::ApiResponse;

/// `GET /health` (also mounted at the versioned root).
///
/// Public, unauthenticated, answers `{"success": true, "message": "ok"}`.
pub async fn healthcheck_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::message("ok"))
}
