//! Book management and search.

use std::sync::Arc;

use crate::domain::entities::{BookPatch, BookWithAuthor, NewBook};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::domain::search::{BookQuery, PageInfo};
use crate::error::AppError;

const BOOK_NOT_FOUND: &str = "Libro no encontrado";
const AUTHOR_MISSING: &str = "El autor especificado no existe";
const ISBN_TAKEN: &str = "El ISBN ya existe";

/// Service for book CRUD and catalog search.
///
/// A book must always reference an existing author; the author is checked
/// before writes so the client gets a specific 404 instead of a store error.
pub struct BookService<A: AuthorRepository + ?Sized, B: BookRepository + ?Sized> {
    authors: Arc<A>,
    books: Arc<B>,
}

impl<A: AuthorRepository + ?Sized, B: BookRepository + ?Sized> BookService<A, B> {
    /// Creates a new book service.
    pub fn new(authors: Arc<A>, books: Arc<B>) -> Self {
        Self { authors, books }
    }

    /// Lists all books with their authors, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_books(&self) -> Result<Vec<BookWithAuthor>, AppError> {
        self.books
            .list()
            .await
            .map_err(|e| e.internal_as("Error al obtener libros"))
    }

    /// Creates a book for an existing author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Conflict`] if the ISBN is already used.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_book(&self, new_book: NewBook) -> Result<BookWithAuthor, AppError> {
        let result: Result<BookWithAuthor, AppError> = async {
            self.require_author(new_book.author_id).await?;
            self.books.create(new_book).await
        }
        .await;

        let book = result.map_err(|e| {
            e.not_found_as(AUTHOR_MISSING)
                .conflict_as(ISBN_TAKEN)
                .internal_as("Error al crear libro")
        })?;

        tracing::info!(book_id = book.book.id, author_id = book.author.id, "Book created");
        Ok(book)
    }

    /// Returns a book with its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_book(&self, id: i64) -> Result<BookWithAuthor, AppError> {
        self.books
            .find_by_id(id)
            .await
            .map_err(|e| e.internal_as("Error al obtener libro"))?
            .ok_or_else(|| AppError::not_found(BOOK_NOT_FOUND))
    }

    /// Applies a partial update.
    ///
    /// When the patch moves the book to another author, that author is
    /// checked first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the new author or the book does not exist.
    /// Returns [`AppError::Conflict`] if the new ISBN is already used.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_book(&self, id: i64, patch: BookPatch) -> Result<BookWithAuthor, AppError> {
        if let Some(author_id) = patch.author_id {
            self.require_author(author_id)
                .await
                .map_err(|e| e.internal_as("Error al actualizar libro"))?;
        }

        self.books.update(id, patch).await.map_err(|e| {
            e.not_found_as(BOOK_NOT_FOUND)
                .conflict_as(ISBN_TAKEN)
                .internal_as("Error al actualizar libro")
        })
    }

    /// Deletes a book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the book does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete_book(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .books
            .delete(id)
            .await
            .map_err(|e| e.internal_as("Error al eliminar libro"))?;

        if !deleted {
            return Err(AppError::not_found(BOOK_NOT_FOUND));
        }

        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// Runs a filtered, sorted, paginated search.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn search_books(
        &self,
        query: &BookQuery,
    ) -> Result<(Vec<BookWithAuthor>, PageInfo), AppError> {
        let page = self
            .books
            .search(query)
            .await
            .map_err(|e| e.internal_as("Error en la búsqueda de libros"))?;

        tracing::debug!(
            total = page.total,
            returned = page.items.len(),
            "Book search completed"
        );

        Ok((page.items, PageInfo::new(query.page, page.total)))
    }

    /// Counts all books.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_books(&self) -> Result<i64, AppError> {
        self.books.count().await
    }

    async fn require_author(&self, author_id: i64) -> Result<(), AppError> {
        match self.authors.find_by_id(author_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(AUTHOR_MISSING)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Author, Book};
    use crate::domain::repositories::{MockAuthorRepository, MockBookRepository};
    use crate::domain::search::{BookPage, PageRequest};
    use chrono::Utc;

    fn create_test_author(id: i64) -> Author {
        Author::new(
            id,
            "Gabriela Mistral".to_string(),
            "gm@example.com".to_string(),
            None,
            Some("Chile".to_string()),
            Some(1889),
            Utc::now(),
        )
    }

    fn create_test_book(id: i64, author_id: i64) -> BookWithAuthor {
        BookWithAuthor {
            book: Book {
                id,
                title: "Desolación".to_string(),
                description: None,
                isbn: Some("978-0000000001".to_string()),
                published_year: Some(1922),
                genre: Some("Poesía".to_string()),
                pages: Some(248),
                created_at: Utc::now(),
                author_id,
            },
            author: create_test_author(author_id),
        }
    }

    fn new_book(author_id: i64) -> NewBook {
        NewBook {
            title: "Desolación".to_string(),
            description: None,
            isbn: Some("978-0000000001".to_string()),
            published_year: Some(1922),
            genre: Some("Poesía".to_string()),
            pages: Some(248),
            author_id,
        }
    }

    fn service(
        authors: MockAuthorRepository,
        books: MockBookRepository,
    ) -> BookService<MockAuthorRepository, MockBookRepository> {
        BookService::new(Arc::new(authors), Arc::new(books))
    }

    #[tokio::test]
    async fn test_create_book_success() {
        let mut authors = MockAuthorRepository::new();
        let mut books = MockBookRepository::new();

        authors
            .expect_find_by_id()
            .withf(|id| *id == 2)
            .times(1)
            .returning(|id| Ok(Some(create_test_author(id))));
        books
            .expect_create()
            .times(1)
            .returning(|new| Ok(create_test_book(10, new.author_id)));

        let service = service(authors, books);

        let created = service.create_book(new_book(2)).await.unwrap();
        assert_eq!(created.book.id, 10);
        assert_eq!(created.author.id, 2);
    }

    #[tokio::test]
    async fn test_create_book_unknown_author() {
        let mut authors = MockAuthorRepository::new();
        let mut books = MockBookRepository::new();

        authors.expect_find_by_id().returning(|_| Ok(None));
        books.expect_create().never();

        let service = service(authors, books);

        let err = service.create_book(new_book(99)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "El autor especificado no existe");
    }

    #[tokio::test]
    async fn test_create_book_duplicate_isbn() {
        let mut authors = MockAuthorRepository::new();
        let mut books = MockBookRepository::new();

        authors
            .expect_find_by_id()
            .returning(|id| Ok(Some(create_test_author(id))));
        books.expect_create().returning(|_| {
            Err(AppError::conflict("Unique constraint violation: books_isbn_key"))
        });

        let service = service(authors, books);

        let err = service.create_book(new_book(1)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
        assert_eq!(err.to_string(), "El ISBN ya existe");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let mut books = MockBookRepository::new();

        books.expect_find_by_id().returning(|_| Ok(None));

        let service = service(MockAuthorRepository::new(), books);

        let err = service.get_book(1).await.unwrap_err();
        assert_eq!(err.to_string(), "Libro no encontrado");
    }

    #[tokio::test]
    async fn test_update_book_checks_new_author_first() {
        let mut authors = MockAuthorRepository::new();
        let mut books = MockBookRepository::new();

        authors.expect_find_by_id().returning(|_| Ok(None));
        books.expect_update().never();

        let service = service(authors, books);
        let patch = BookPatch {
            author_id: Some(77),
            ..Default::default()
        };

        let err = service.update_book(1, patch).await.unwrap_err();
        assert_eq!(err.to_string(), "El autor especificado no existe");
    }

    #[tokio::test]
    async fn test_update_book_missing_book() {
        let mut books = MockBookRepository::new();

        books
            .expect_update()
            .returning(|_, _| Err(AppError::not_found("Book not found")));

        let service = service(MockAuthorRepository::new(), books);
        let patch = BookPatch {
            title: Some("Ternura".to_string()),
            ..Default::default()
        };

        let err = service.update_book(1, patch).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Libro no encontrado");
    }

    #[tokio::test]
    async fn test_delete_book() {
        let mut books = MockBookRepository::new();

        books
            .expect_delete()
            .withf(|id| *id == 4)
            .times(1)
            .returning(|_| Ok(true));

        let service = service(MockAuthorRepository::new(), books);

        assert!(service.delete_book(4).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_book_not_found() {
        let mut books = MockBookRepository::new();

        books.expect_delete().returning(|_| Ok(false));

        let service = service(MockAuthorRepository::new(), books);

        let err = service.delete_book(4).await.unwrap_err();
        assert_eq!(err.to_string(), "Libro no encontrado");
    }

    #[tokio::test]
    async fn test_search_builds_page_info_from_total() {
        let mut books = MockBookRepository::new();

        books.expect_search().times(1).returning(|_| {
            Ok(BookPage {
                items: vec![create_test_book(1, 1), create_test_book(2, 1)],
                total: 12,
            })
        });

        let service = service(MockAuthorRepository::new(), books);
        let query = BookQuery {
            page: PageRequest::new(Some(2), Some(5)),
            ..Default::default()
        };

        let (items, info) = service.search_books(&query).await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(info.total, 12);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next);
        assert!(info.has_prev);
    }

    #[tokio::test]
    async fn test_search_masks_database_error() {
        let mut books = MockBookRepository::new();

        books
            .expect_search()
            .returning(|_| Err(AppError::internal("Database error")));

        let service = service(MockAuthorRepository::new(), books);

        let err = service.search_books(&BookQuery::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Error en la búsqueda de libros");
    }
}
