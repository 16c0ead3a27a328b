//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! store-dependent checks and error translation. Services consume repository
//! traits and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::author_service::AuthorService`] - Authors, their books and statistics
//! - [`services::book_service::BookService`] - Books and catalog search

pub mod services;
