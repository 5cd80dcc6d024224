use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::response::ApiResponse;

/// Application error taxonomy.
///
/// Every variant carries a stable `message` (rendered into the envelope's
/// `message` field) and a lower-level `detail` (rendered into `error`).
/// Internal errors keep their detail generic; the underlying cause is logged
/// where the error is constructed.
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, detail: String },
    NotFound { message: String, detail: String },
    Unauthorized { message: String, detail: String },
    Conflict { message: String, detail: String },
    Internal { message: String, detail: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn conflict(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let (message, detail) = match self {
            AppError::Validation { message, detail }
            | AppError::NotFound { message, detail }
            | AppError::Unauthorized { message, detail }
            | AppError::Conflict { message, detail }
            | AppError::Internal { message, detail } => (message, detail),
        };

        (status, Json(ApiResponse::error(message, detail))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "Resource already exists",
                format!(
                    "unique constraint violation{}",
                    db.constraint()
                        .map(|c| format!(" ({c})"))
                        .unwrap_or_default()
                ),
            );
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("Database error", "internal error")
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request("Invalid request body", e.to_string())
    }
}
