//! API route configuration.

use crate::api::handlers::{
    author_books_handler, author_stats_handler, create_author_handler, create_book_handler,
    delete_author_handler, delete_book_handler, get_author_handler, get_book_handler,
    list_authors_handler, list_books_handler, search_books_handler, update_author_handler,
    update_book_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All catalog routes, nested under `/api` by the top-level router.
///
/// # Endpoints
///
/// - `GET    /authors`              - List authors with book counts
/// - `POST   /authors`              - Create an author
/// - `GET    /authors/{id}`         - Author with books
/// - `PUT    /authors/{id}`         - Partially update an author
/// - `DELETE /authors/{id}`         - Delete an author and their books
/// - `GET    /authors/{id}/books`   - Author's books, latest first
/// - `GET    /authors/{id}/stats`   - Statistics over the author's books
/// - `GET    /books`                - List books with authors
/// - `POST   /books`                - Create a book
/// - `GET    /books/search`         - Filtered, sorted, paginated search
/// - `GET    /books/{id}`           - Book with author
/// - `PUT    /books/{id}`           - Partially update a book
/// - `DELETE /books/{id}`           - Delete a book
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/authors",
            get(list_authors_handler).post(create_author_handler),
        )
        .route(
            "/authors/{id}",
            get(get_author_handler)
                .put(update_author_handler)
                .delete(delete_author_handler),
        )
        .route("/authors/{id}/books", get(author_books_handler))
        .route("/authors/{id}/stats", get(author_stats_handler))
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route("/books/search", get(search_books_handler))
        .route(
            "/books/{id}",
            get(get_book_handler)
                .put(update_book_handler)
                .delete(delete_book_handler),
        )
}
