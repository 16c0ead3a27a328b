//! Book entity and its create/patch inputs.

use chrono::{DateTime, Utc};

use super::Author;

/// A catalog entry owned by exactly one author.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub pages: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub author_id: i64,
}

/// A book joined with its owning author.
#[derive(Debug, Clone, PartialEq)]
pub struct BookWithAuthor {
    pub book: Book,
    pub author: Author,
}

/// Input data for creating a new book.
///
/// `author_id` must reference an existing author.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
    pub pages: Option<i32>,
    pub author_id: i64,
}

/// Partial update for an existing book.
///
/// `None` fields are left unchanged. For nullable columns, `Some(None)`
/// clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub isbn: Option<Option<String>>,
    pub published_year: Option<Option<i32>>,
    pub genre: Option<Option<String>>,
    pub pages: Option<Option<i32>>,
    pub author_id: Option<i64>,
}

impl BookPatch {
    /// Applies the patch to a book in place.
    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(description) = &self.description {
            book.description = description.clone();
        }
        if let Some(isbn) = &self.isbn {
            book.isbn = isbn.clone();
        }
        if let Some(published_year) = self.published_year {
            book.published_year = published_year;
        }
        if let Some(genre) = &self.genre {
            book.genre = genre.clone();
        }
        if let Some(pages) = self.pages {
            book.pages = pages;
        }
        if let Some(author_id) = self.author_id {
            book.author_id = author_id;
        }
    }
}
