//! Handlers for author endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::author::{
    AuthorBooksResponse, AuthorDetailResponse, AuthorItem, AuthorListItem, CreateAuthorRequest,
    UpdateAuthorRequest,
};
use crate::api::dto::message::MessageResponse;
use crate::api::dto::stats::AuthorStatsResponse;
use crate::api::extract::{IdPath, ValidJson};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all authors with their book counts.
///
/// # Endpoint
///
/// `GET /api/authors`
pub async fn list_authors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<AuthorListItem>>, AppError> {
    let authors = state.author_service.list_authors().await?;

    Ok(Json(authors.into_iter().map(AuthorListItem::from).collect()))
}

/// Creates an author.
///
/// # Endpoint
///
/// `POST /api/authors`
///
/// # Errors
///
/// Returns 400 if name or email is missing.
/// Returns 409 if the email is already registered.
pub async fn create_author_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateAuthorRequest>,
) -> Result<(StatusCode, Json<AuthorItem>), AppError> {
    let author = state
        .author_service
        .create_author(payload.into_new_author())
        .await?;

    Ok((StatusCode::CREATED, Json(author.into())))
}

/// Returns an author with their books.
///
/// # Endpoint
///
/// `GET /api/authors/{id}`
pub async fn get_author_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<AuthorDetailResponse>, AppError> {
    let detail = state.author_service.get_author(id).await?;

    Ok(Json(detail.into()))
}

/// Partially updates an author.
///
/// # Endpoint
///
/// `PUT /api/authors/{id}`
///
/// Omitted fields are left untouched; `null` clears `bio`, `nationality`
/// and `birthYear`.
///
/// # Errors
///
/// Returns 400 if the email is malformed or the name is empty.
/// Returns 404 if the author does not exist.
/// Returns 409 if the email belongs to another author.
pub async fn update_author_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<UpdateAuthorRequest>,
) -> Result<Json<AuthorDetailResponse>, AppError> {
    let detail = state
        .author_service
        .update_author(id, payload.into_patch())
        .await?;

    Ok(Json(detail.into()))
}

/// Deletes an author and all of their books.
///
/// # Endpoint
///
/// `DELETE /api/authors/{id}`
pub async fn delete_author_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.author_service.delete_author(id).await?;

    Ok(Json(MessageResponse::new("Autor eliminado correctamente")))
}

/// Lists an author's books, latest publication first.
///
/// # Endpoint
///
/// `GET /api/authors/{id}/books`
pub async fn author_books_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<AuthorBooksResponse>, AppError> {
    let (author, books) = state.author_service.author_books(id).await?;

    Ok(Json(AuthorBooksResponse::new(author, books)))
}

/// Returns statistics over an author's books.
///
/// # Endpoint
///
/// `GET /api/authors/{id}/stats`
pub async fn author_stats_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<AuthorStatsResponse>, AppError> {
    let (author, stats) = state.author_service.author_stats(id).await?;

    Ok(Json(AuthorStatsResponse::new(author, stats)))
}
