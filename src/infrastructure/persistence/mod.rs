//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are checked at runtime (`query_as` + `FromRow`); search SQL is assembled
//! with [`sqlx::QueryBuilder`].
//!
//! # Repositories
//!
//! - [`PgAuthorRepository`] - Author storage and book counts
//! - [`PgBookRepository`] - Book storage, per-author listing and search

pub mod pg_author_repository;
pub mod pg_book_repository;

pub use pg_author_repository::PgAuthorRepository;
pub use pg_book_repository::PgBookRepository;
