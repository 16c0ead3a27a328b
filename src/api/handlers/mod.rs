//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod authors;
pub mod books;
pub mod health;
pub mod search;

pub use authors::{
    author_books_handler, author_stats_handler, create_author_handler, delete_author_handler,
    get_author_handler, list_authors_handler, update_author_handler,
};
pub use books::{
    create_book_handler, delete_book_handler, get_book_handler, list_books_handler,
    update_book_handler,
};
pub use health::health_handler;
pub use search::search_books_handler;
