//! Handler for the catalog search endpoint.

use axum::{Json, extract::State};

use crate::api::dto::search::{SearchItem, SearchParams, SearchResponse};
use crate::api::extract::FirstQuery;
use crate::error::AppError;
use crate::state::AppState;

/// Searches books with filters, sorting and pagination.
///
/// # Endpoint
///
/// `GET /api/books/search`
///
/// # Query Parameters
///
/// A repeated parameter keeps its first value.
///
/// - `search` - case-insensitive substring of the title
/// - `genre` - exact genre
/// - `authorName` - case-insensitive substring of the author's name
/// - `authorId` - exact author id
/// - `sortBy` - `title`, `publishedYear` or `createdAt` (default)
/// - `order` - `asc` or `desc` (default)
/// - `page` - 1-based page (default 1)
/// - `limit` - page size (default 10, at most 50)
///
/// # Response
///
/// ```json
/// {
///   "data": [{ "id": 1, "title": "...", "author": { "id": 1, "name": "...", "email": "..." } }],
///   "pagination": { "page": 1, "limit": 10, "total": 1, "totalPages": 1, "hasNext": false, "hasPrev": false }
/// }
/// ```
pub async fn search_books_handler(
    State(state): State<AppState>,
    FirstQuery(params): FirstQuery<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.into_query()?;

    let (books, page_info) = state.book_service.search_books(&query).await?;

    Ok(Json(SearchResponse {
        data: books.into_iter().map(SearchItem::from).collect(),
        pagination: page_info.into(),
    }))
}
