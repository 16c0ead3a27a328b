//! Author management and per-author statistics.

use std::sync::Arc;

use crate::domain::entities::{Author, AuthorDetail, AuthorListing, AuthorPatch, Book, NewAuthor};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::domain::search::SortOrder;
use crate::domain::stats::AuthorStats;
use crate::error::AppError;

const AUTHOR_NOT_FOUND: &str = "Autor no encontrado";

/// Service for author CRUD, an author's bibliography and statistics.
///
/// Store-level errors are rewritten into the user-facing messages of each
/// operation; anything unexpected becomes a generic `Internal` message.
pub struct AuthorService<A: AuthorRepository + ?Sized, B: BookRepository + ?Sized> {
    authors: Arc<A>,
    books: Arc<B>,
}

impl<A: AuthorRepository + ?Sized, B: BookRepository + ?Sized> AuthorService<A, B> {
    /// Creates a new author service.
    pub fn new(authors: Arc<A>, books: Arc<B>) -> Self {
        Self { authors, books }
    }

    /// Lists all authors with their book counts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_authors(&self) -> Result<Vec<AuthorListing>, AppError> {
        self.authors
            .list_with_book_counts()
            .await
            .map_err(|e| e.internal_as("Error al obtener autores"))
    }

    /// Creates an author after checking the email is free.
    ///
    /// A concurrent insert with the same email is still rejected by the
    /// store and reported the same way.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if name or email is empty.
    /// Returns [`AppError::Conflict`] if the email is already registered.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_author(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        const EMAIL_TAKEN: &str = "Ya existe un autor con ese correo";

        if new_author.name.is_empty() || new_author.email.is_empty() {
            return Err(AppError::bad_request("Nombre y correo son obligatorios"));
        }

        let existing = self
            .authors
            .find_by_email(&new_author.email)
            .await
            .map_err(|e| e.internal_as("Error al crear autor"))?;
        if existing.is_some() {
            return Err(AppError::conflict(EMAIL_TAKEN));
        }

        let author = self
            .authors
            .create(new_author)
            .await
            .map_err(|e| e.conflict_as(EMAIL_TAKEN).internal_as("Error al crear autor"))?;

        tracing::info!(author_id = author.id, "Author created");
        Ok(author)
    }

    /// Returns an author with their books, latest publication first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_author(&self, id: i64) -> Result<AuthorDetail, AppError> {
        self.load_detail(id)
            .await
            .map_err(|e| e.internal_as("Error al obtener autor"))
    }

    /// Applies a partial update and returns the author with their books.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Conflict`] if the new email belongs to another author.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_author(&self, id: i64, patch: AuthorPatch) -> Result<AuthorDetail, AppError> {
        let result: Result<AuthorDetail, AppError> = async {
            if patch.is_empty() {
                return self.load_detail(id).await;
            }

            let author = self.authors.update(id, patch).await?;
            let books = self.books.list_by_author(id, SortOrder::Desc).await?;
            Ok(AuthorDetail { author, books })
        }
        .await;

        result.map_err(|e| {
            e.not_found_as(AUTHOR_NOT_FOUND)
                .conflict_as("El email ya está registrado")
                .internal_as("Error al actualizar autor")
        })
    }

    /// Deletes an author together with all of their books.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_author(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .authors
            .delete(id)
            .await
            .map_err(|e| e.internal_as("Error al eliminar autor"))?;

        if !deleted {
            return Err(AppError::not_found(AUTHOR_NOT_FOUND));
        }

        tracing::info!(author_id = id, "Author deleted");
        Ok(())
    }

    /// Returns an author and their books, latest publication first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn author_books(&self, id: i64) -> Result<(Author, Vec<Book>), AppError> {
        self.load_detail(id)
            .await
            .map(|detail| (detail.author, detail.books))
            .map_err(|e| e.internal_as("Error al obtener libros del autor"))
    }

    /// Computes statistics over an author's books in publication order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn author_stats(&self, id: i64) -> Result<(Author, AuthorStats), AppError> {
        let result: Result<(Author, AuthorStats), AppError> = async {
            let author = self.require_author(id).await?;
            let books = self.books.list_by_author(id, SortOrder::Asc).await?;
            Ok((author, AuthorStats::from_books(&books)))
        }
        .await;

        result.map_err(|e| e.internal_as("Error al obtener estadísticas del autor"))
    }

    /// Counts all authors.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_authors(&self) -> Result<i64, AppError> {
        self.authors.count().await
    }

    async fn require_author(&self, id: i64) -> Result<Author, AppError> {
        self.authors
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(AUTHOR_NOT_FOUND))
    }

    async fn load_detail(&self, id: i64) -> Result<AuthorDetail, AppError> {
        let author = self.require_author(id).await?;
        let books = self.books.list_by_author(id, SortOrder::Desc).await?;
        Ok(AuthorDetail { author, books })
    }
}
