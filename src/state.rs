//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthorService, BookService};
use crate::domain::repositories::{AuthorRepository, BookRepository};
use crate::infrastructure::memory::MemoryCatalog;
use crate::infrastructure::persistence::{PgAuthorRepository, PgBookRepository};

/// Author service over whichever store backs the application.
pub type DynAuthorService = AuthorService<dyn AuthorRepository, dyn BookRepository>;

/// Book service over whichever store backs the application.
pub type DynBookService = BookService<dyn AuthorRepository, dyn BookRepository>;

#[derive(Clone)]
pub struct AppState {
    pub author_service: Arc<DynAuthorService>,
    pub book_service: Arc<DynBookService>,
}

impl AppState {
    /// Wires both services to the same pair of repositories.
    pub fn new(authors: Arc<dyn AuthorRepository>, books: Arc<dyn BookRepository>) -> Self {
        Self {
            author_service: Arc::new(AuthorService::new(authors.clone(), books.clone())),
            book_service: Arc::new(BookService::new(authors, books)),
        }
    }

    /// State backed by PostgreSQL.
    pub fn with_pool(pool: PgPool) -> Self {
        let pool = Arc::new(pool);
        Self::new(
            Arc::new(PgAuthorRepository::new(pool.clone())),
            Arc::new(PgBookRepository::new(pool)),
        )
    }

    /// State backed by a fresh in-memory catalog.
    pub fn in_memory() -> Self {
        let catalog = Arc::new(MemoryCatalog::new());
        Self::new(catalog.clone(), catalog)
    }
}
