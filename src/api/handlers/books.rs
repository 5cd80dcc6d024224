//! Handlers for the book catalog endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;
use validator::Validate;

use crate::api::dto::book::{CreateBookRequest, UpdateBookRequest};
use crate::api::dto::pagination::ListBooksQuery;
use crate::api::extract::{AppJson, AuthUser};
use crate::api::response::ApiResponse;
use crate::application::services::CacheOutcome;
use crate::domain::entities::{Book, NewBook};
use crate::error::AppError;
use crate::state::AppState;

fn list_message(outcome: CacheOutcome) -> &'static str {
    match outcome {
        CacheOutcome::Hit => "Books retrieved from cache",
        CacheOutcome::Miss => "Books retrieved successfully",
    }
}

/// The id path segment is parsed by hand so a malformed value answers the
/// same 404 envelope as an unknown one.
fn parse_book_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::not_found("Book not found", format!("invalid book id {raw:?}")))
}

/// Lists books.
///
/// # Endpoint
///
/// `GET /api/v1/books`
///
/// Raw `?offset=&limit=` windows answer a plain array; any of
/// `page`/`page_size`/`sort`/`order`/`author`/`title` switches to paged mode
/// and the envelope carries page metadata. Both modes read through the
/// listing cache (60s TTL).
pub async fn list_books_handler(
    State(state): State<AppState>,
    Query(query): Query<ListBooksQuery>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<Book>>>), AppError> {
    if query.is_paged() {
        let params = query.page_params();
        let filter = query.filter();

        let (books, total_items, outcome) =
            state.book_service.list_books_paged(&params, &filter).await?;
        let meta = params.meta(total_items);

        return Ok((
            StatusCode::OK,
            Json(ApiResponse::success(list_message(outcome), books).with_meta(meta)),
        ));
    }

    let (offset, limit) = query.offset_limit()?;
    let (books, outcome) = state.book_service.list_books(offset, limit).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(list_message(outcome), books)),
    ))
}

/// Creates a book.
///
/// # Endpoint
///
/// `POST /api/v1/books`
///
/// Requires the API key AND a bearer token. Invalidates every listing cache
/// entry so a follow-up list cannot serve a stale window.
pub async fn create_book_handler(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(payload): AppJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), AppError> {
    payload.validate()?;

    let book = state
        .book_service
        .create_book(NewBook {
            title: payload.title,
            author: payload.author,
        })
        .await?;

    tracing::info!(username = %user.username, book_id = %book.id, "book created");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Book created successfully", book)),
    ))
}

/// Fetches a single book.
///
/// # Endpoint
///
/// `GET /api/v1/books/{id}` — 404 when the id is unknown or not a UUID.
pub async fn get_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), AppError> {
    let id = parse_book_id(&id)?;
    let book = state.book_service.get_book(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Book retrieved successfully", book)),
    ))
}

/// Partially updates a book.
///
/// # Endpoint
///
/// `PUT /api/v1/books/{id}`
///
/// Sparse merge: only non-empty incoming fields overwrite stored values.
/// Listing caches are not invalidated here (see the service docs).
pub async fn update_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(payload): AppJson<UpdateBookRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Book>>), AppError> {
    let id = parse_book_id(&id)?;
    let book = state.book_service.update_book(id, payload.into_patch()).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Book updated successfully", book)),
    ))
}

/// Hard-deletes a book.
///
/// # Endpoint
///
/// `DELETE /api/v1/books/{id}` — 204 on success; the envelope echoes a
/// success boolean rather than the deleted entity.
pub async fn delete_book_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<ApiResponse<bool>>), AppError> {
    let id = parse_book_id(&id)?;
    state.book_service.delete_book(id).await?;

    Ok((
        StatusCode::NO_CONTENT,
        Json(ApiResponse::success("Book deleted successfully", true)),
    ))
}
