//! In-memory catalog store implementing both repository traits.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::{
    Author, AuthorListing, AuthorPatch, Book, BookPatch, BookWithAuthor, NewAuthor, NewBook,
};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::domain::search::{BookPage, BookQuery, BookSort, SortField, SortOrder};
use crate::error::AppError;

/// Authors and books held in ordered maps behind a single lock.
///
/// Error kinds and messages mirror what the PostgreSQL repositories
/// produce for the same constraint failures.
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    authors: BTreeMap<i64, Author>,
    books: BTreeMap<i64, Book>,
    last_author_id: i64,
    last_book_id: i64,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        debug!("Using in-memory catalog");
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Tables {
    fn ensure_email_free(&self, email: &str, except: Option<i64>) -> Result<(), AppError> {
        let taken = self
            .authors
            .values()
            .any(|a| a.email == email && Some(a.id) != except);

        if taken {
            return Err(AppError::conflict(
                "Unique constraint violation: authors_email_key",
            ));
        }
        Ok(())
    }

    fn ensure_isbn_free(&self, isbn: Option<&str>, except: Option<i64>) -> Result<(), AppError> {
        let Some(isbn) = isbn else {
            return Ok(());
        };

        let taken = self
            .books
            .values()
            .any(|b| b.isbn.as_deref() == Some(isbn) && Some(b.id) != except);

        if taken {
            return Err(AppError::conflict(
                "Unique constraint violation: books_isbn_key",
            ));
        }
        Ok(())
    }

    fn ensure_author_exists(&self, author_id: i64) -> Result<(), AppError> {
        if self.authors.contains_key(&author_id) {
            Ok(())
        } else {
            Err(AppError::not_found("Referenced record not found"))
        }
    }

    fn ensure_book_checks(book: &Book) -> Result<(), AppError> {
        if book.title.chars().count() < 3 {
            return Err(AppError::bad_request(
                "Check constraint violation: books_title_length",
            ));
        }
        if book.pages.is_some_and(|p| p < 1) {
            return Err(AppError::bad_request(
                "Check constraint violation: books_pages_positive",
            ));
        }
        Ok(())
    }

    fn join(&self, book: &Book) -> Option<BookWithAuthor> {
        self.authors.get(&book.author_id).map(|author| BookWithAuthor {
            book: book.clone(),
            author: author.clone(),
        })
    }

    fn sorted_books(&self, sort: BookSort) -> Vec<&Book> {
        let mut books: Vec<&Book> = self.books.values().collect();
        books.sort_by(|a, b| sort.compare(a, b));
        books
    }
}

#[async_trait]
impl AuthorRepository for MemoryCatalog {
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let mut tables = self.tables.write().await;
        tables.ensure_email_free(&new_author.email, None)?;

        tables.last_author_id += 1;
        let author = Author::new(
            tables.last_author_id,
            new_author.name,
            new_author.email,
            new_author.bio,
            new_author.nationality,
            new_author.birth_year,
            Utc::now(),
        );
        tables.authors.insert(author.id, author.clone());

        Ok(author)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        Ok(self.tables.read().await.authors.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.authors.values().find(|a| a.email == email).cloned())
    }

    async fn list_with_book_counts(&self) -> Result<Vec<AuthorListing>, AppError> {
        let tables = self.tables.read().await;

        let mut listings: Vec<AuthorListing> = tables
            .authors
            .values()
            .map(|author| AuthorListing {
                author: author.clone(),
                book_count: tables
                    .books
                    .values()
                    .filter(|b| b.author_id == author.id)
                    .count() as i64,
            })
            .collect();

        listings.sort_by(|a, b| {
            b.author
                .created_at
                .cmp(&a.author.created_at)
                .then_with(|| b.author.id.cmp(&a.author.id))
        });

        Ok(listings)
    }

    async fn update(&self, id: i64, patch: AuthorPatch) -> Result<Author, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.authors.contains_key(&id) {
            return Err(AppError::not_found("Author not found"));
        }
        if let Some(email) = &patch.email {
            tables.ensure_email_free(email, Some(id))?;
        }

        let author = tables
            .authors
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Author not found"))?;
        patch.apply(author);

        Ok(author.clone())
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;

        if tables.authors.remove(&id).is_none() {
            return Ok(false);
        }
        tables.books.retain(|_, b| b.author_id != id);

        Ok(true)
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.authors.len() as i64)
    }
}

#[async_trait]
impl BookRepository for MemoryCatalog {
    async fn create(&self, new_book: NewBook) -> Result<BookWithAuthor, AppError> {
        let mut tables = self.tables.write().await;

        let book = Book {
            id: tables.last_book_id + 1,
            title: new_book.title,
            description: new_book.description,
            isbn: new_book.isbn,
            published_year: new_book.published_year,
            genre: new_book.genre,
            pages: new_book.pages,
            created_at: Utc::now(),
            author_id: new_book.author_id,
        };

        Tables::ensure_book_checks(&book)?;
        tables.ensure_author_exists(book.author_id)?;
        tables.ensure_isbn_free(book.isbn.as_deref(), None)?;

        tables.last_book_id = book.id;
        tables.books.insert(book.id, book.clone());

        tables
            .join(&book)
            .ok_or_else(|| AppError::not_found("Referenced record not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookWithAuthor>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.books.get(&id).and_then(|b| tables.join(b)))
    }

    async fn list(&self) -> Result<Vec<BookWithAuthor>, AppError> {
        let tables = self.tables.read().await;
        let newest_first = BookSort::new(SortField::CreatedAt, SortOrder::Desc);

        Ok(tables
            .sorted_books(newest_first)
            .into_iter()
            .filter_map(|b| tables.join(b))
            .collect())
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        order: SortOrder,
    ) -> Result<Vec<Book>, AppError> {
        let tables = self.tables.read().await;
        let by_year = BookSort::new(SortField::PublishedYear, order);

        Ok(tables
            .sorted_books(by_year)
            .into_iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i64, patch: BookPatch) -> Result<BookWithAuthor, AppError> {
        let mut tables = self.tables.write().await;

        let mut book = tables
            .books
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Book not found"))?;
        patch.apply(&mut book);

        Tables::ensure_book_checks(&book)?;
        tables.ensure_author_exists(book.author_id)?;
        tables.ensure_isbn_free(book.isbn.as_deref(), Some(id))?;

        tables.books.insert(id, book.clone());

        tables
            .join(&book)
            .ok_or_else(|| AppError::not_found("Referenced record not found"))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.tables.write().await.books.remove(&id).is_some())
    }

    async fn search(&self, query: &BookQuery) -> Result<BookPage<BookWithAuthor>, AppError> {
        let tables = self.tables.read().await;

        let matching: Vec<BookWithAuthor> = tables
            .sorted_books(query.sort)
            .into_iter()
            .filter_map(|b| tables.join(b))
            .filter(|row| query.filter.matches(&row.book, &row.author))
            .collect();

        let total = matching.len() as i64;
        let skip = usize::try_from(query.page.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(query.page.limit()).unwrap_or(usize::MAX);

        Ok(BookPage {
            items: matching.into_iter().skip(skip).take(take).collect(),
            total,
        })
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.tables.read().await.books.len() as i64)
    }
}
