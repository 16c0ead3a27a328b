//! Handlers for book endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::book::{BookWithAuthorItem, CreateBookRequest, UpdateBookRequest};
use crate::api::dto::message::MessageResponse;
use crate::api::extract::{IdPath, ValidJson};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all books with their authors.
///
/// # Endpoint
///
/// `GET /api/books`
pub async fn list_books_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BookWithAuthorItem>>, AppError> {
    let books = state.book_service.list_books().await?;

    Ok(Json(books.into_iter().map(BookWithAuthorItem::from).collect()))
}

/// Creates a book.
///
/// # Endpoint
///
/// `POST /api/books`
///
/// # Errors
///
/// Returns 400 if the title is too short, pages is not positive or the
/// author is missing.
/// Returns 404 if the author does not exist.
/// Returns 409 if the ISBN is already used.
pub async fn create_book_handler(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateBookRequest>,
) -> Result<(StatusCode, Json<BookWithAuthorItem>), AppError> {
    let new_book = payload
        .into_new_book()
        .ok_or_else(|| AppError::bad_request("El autor es obligatorio"))?;

    let book = state.book_service.create_book(new_book).await?;

    Ok((StatusCode::CREATED, Json(book.into())))
}

/// Returns a book with its author.
///
/// # Endpoint
///
/// `GET /api/books/{id}`
pub async fn get_book_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<BookWithAuthorItem>, AppError> {
    let book = state.book_service.get_book(id).await?;

    Ok(Json(book.into()))
}

/// Partially updates a book.
///
/// # Endpoint
///
/// `PUT /api/books/{id}`
///
/// # Errors
///
/// Returns 400 if the title is too short or pages is not positive.
/// Returns 404 if the book or the new author does not exist.
/// Returns 409 if the ISBN is already used.
pub async fn update_book_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<UpdateBookRequest>,
) -> Result<Json<BookWithAuthorItem>, AppError> {
    let book = state
        .book_service
        .update_book(id, payload.into_patch())
        .await?;

    Ok(Json(book.into()))
}

/// Deletes a book.
///
/// # Endpoint
///
/// `DELETE /api/books/{id}`
pub async fn delete_book_handler(
    IdPath(id): IdPath,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    state.book_service.delete_book(id).await?;

    Ok(Json(MessageResponse::new("Libro eliminado correctamente")))
}
