//! DTOs for book endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::{Validate, ValidationError};

use super::author::AuthorItem;
use super::fields::{lenient_int, patch_int, patch_text};
use crate::domain::entities::{Book, BookPatch, BookWithAuthor, NewBook};

/// Request body for `POST /api/books`.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[validate(
        required(message = "El título debe tener al menos 3 caracteres"),
        length(min = 3, message = "El título debe tener al menos 3 caracteres")
    )]
    pub title: Option<String>,

    #[validate(required(message = "El autor es obligatorio"))]
    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub author_id: Option<i64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub description: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub isbn: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub published_year: Option<i32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub genre: Option<String>,

    #[validate(range(min = 1, message = "El número de páginas debe ser mayor a 0"))]
    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub pages: Option<i32>,
}

impl CreateBookRequest {
    /// Converts a validated request. `None` if a required field is missing.
    pub fn into_new_book(self) -> Option<NewBook> {
        Some(NewBook {
            title: self.title?,
            author_id: self.author_id?,
            description: self.description,
            isbn: self.isbn,
            published_year: self.published_year,
            genre: self.genre,
            pages: self.pages,
        })
    }
}

/// Request body for `PUT /api/books/{id}`.
///
/// `title` and `authorId` ignore `null`; the other fields are tri-state
/// (absent = unchanged, `null`/`""` = cleared, value = set).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_book_update"))]
pub struct UpdateBookRequest {
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub author_id: Option<i64>,

    #[serde(default, deserialize_with = "patch_text::deserialize")]
    pub description: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_text::deserialize")]
    pub isbn: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_int::deserialize")]
    pub published_year: Option<Option<i32>>,

    #[serde(default, deserialize_with = "patch_text::deserialize")]
    pub genre: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_int::deserialize")]
    pub pages: Option<Option<i32>>,
}

/// Title is checked before pages; only supplied values are checked.
fn validate_book_update(req: &UpdateBookRequest) -> Result<(), ValidationError> {
    if req.title.as_ref().is_some_and(|t| t.chars().count() < 3) {
        return Err(ValidationError::new("length")
            .with_message("El título debe tener al menos 3 caracteres".into()));
    }

    if let Some(Some(pages)) = req.pages
        && pages < 1
    {
        return Err(ValidationError::new("range")
            .with_message("El número de páginas debe ser mayor a 0".into()));
    }

    Ok(())
}

impl UpdateBookRequest {
    pub fn into_patch(self) -> BookPatch {
        BookPatch {
            title: self.title,
            description: self.description,
            isbn: self.isbn,
            published_year: self.published_year,
            genre: self.genre,
            pages: self.pages,
            author_id: self.author_id,
        }
    }
}

/// Book fields as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookItem {
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

impl From<Book> for BookItem {
    fn from(b: Book) -> Self {
        Self {
            id: b.id,
            title: b.title,
            description: b.description,
            isbn: b.isbn,
            published_year: b.published_year,
            genre: b.genre,
            pages: b.pages,
            created_at: b.created_at,
            author_id: b.author_id,
        }
    }
}

/// Book with its full author record.
#[derive(Debug, Serialize)]
pub struct BookWithAuthorItem {
    #[serde(flatten)]
    pub book: BookItem,
    pub author: AuthorItem,
}

impl From<BookWithAuthor> for BookWithAuthorItem {
    fn from(b: BookWithAuthor) -> Self {
        Self {
            book: b.book.into(),
            author: b.author.into(),
        }
    }
}
