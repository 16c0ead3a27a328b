//! Repository trait for book data access.

use crate::domain::entities::{Book, BookPatch, BookWithAuthor, NewBook};
use crate::domain::search::{BookPage, BookQuery, SortOrder};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing books.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::memory::MemoryCatalog`] - in-process implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_book.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Creates a new book and returns it joined with its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if `author_id` does not reference an author.
    /// Returns [`AppError::Conflict`] if the ISBN is already used.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_book: NewBook) -> Result<BookWithAuthor, AppError>;

    /// Finds a book with its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<BookWithAuthor>, AppError>;

    /// Lists all books with their authors, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<BookWithAuthor>, AppError>;

    /// Lists one author's books ordered by publication year.
    ///
    /// Books without a year sort last when ascending and first when
    /// descending; ties are broken by id in the same direction.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_author(&self, author_id: i64, order: SortOrder)
    -> Result<Vec<Book>, AppError>;

    /// Partially updates a book and returns it joined with its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book or the new author is missing.
    /// Returns [`AppError::Conflict`] if the new ISBN is already used.
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i64, patch: BookPatch) -> Result<BookWithAuthor, AppError>;

    /// Deletes a book. Returns `Ok(false)` if no book has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Returns one page of books matching `query.filter` and the total
    /// number of matches.
    ///
    /// The total and the page are evaluated against the same predicate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, query: &BookQuery) -> Result<BookPage<BookWithAuthor>, AppError>;

    /// Counts all books.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
