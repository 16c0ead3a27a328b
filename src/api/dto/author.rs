//! DTOs for author endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use std::sync::LazyLock;
use validator::Validate;

use super::book::BookItem;
use super::fields::{lenient_int, patch_int, patch_text};
use crate::domain::entities::{Author, AuthorDetail, AuthorListing, AuthorPatch, Book, NewAuthor};

/// `local@domain.tld` with no whitespace and exactly one `@` per side.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// Request body for `POST /api/authors`.
///
/// Only presence of `name` and `email` is checked; the email format is not.
#[serde_as]
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthorRequest {
    #[validate(
        required(message = "Nombre y correo son obligatorios"),
        length(min = 1, message = "Nombre y correo son obligatorios")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "Nombre y correo son obligatorios"),
        length(min = 1, message = "Nombre y correo son obligatorios")
    )]
    pub email: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub bio: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub nationality: Option<String>,

    #[serde(default, deserialize_with = "lenient_int::deserialize")]
    pub birth_year: Option<i32>,
}

impl CreateAuthorRequest {
    pub fn into_new_author(self) -> NewAuthor {
        NewAuthor {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            bio: self.bio,
            nationality: self.nationality,
            birth_year: self.birth_year,
        }
    }
}

/// Request body for `PUT /api/authors/{id}`.
///
/// - **Absent** field → unchanged
/// - **`null`** → unchanged for `name`/`email`, cleared otherwise
/// - **Value** → set (`email` must look like an address)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthorRequest {
    #[validate(length(min = 1, message = "El nombre no puede estar vacío"))]
    pub name: Option<String>,

    #[validate(regex(path = "*EMAIL_REGEX", message = "Email inválido"))]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "patch_text::deserialize")]
    pub bio: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_text::deserialize")]
    pub nationality: Option<Option<String>>,

    #[serde(default, deserialize_with = "patch_int::deserialize")]
    pub birth_year: Option<Option<i32>>,
}

impl UpdateAuthorRequest {
    pub fn into_patch(self) -> AuthorPatch {
        AuthorPatch {
            name: self.name,
            email: self.email,
            bio: self.bio,
            nationality: self.nationality,
            birth_year: self.birth_year,
        }
    }
}

/// Author as returned by the API.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorItem {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl From<Author> for AuthorItem {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
            bio: a.bio,
            nationality: a.nationality,
            birth_year: a.birth_year,
            created_at: a.created_at,
        }
    }
}

/// Relation counters, serialized as `"_count": {"books": n}`.
#[derive(Debug, Serialize)]
pub struct RelationCount {
    pub books: i64,
}

/// Entry of `GET /api/authors`.
#[derive(Debug, Serialize)]
pub struct AuthorListItem {
    #[serde(flatten)]
    pub author: AuthorItem,
    #[serde(rename = "_count")]
    pub count: RelationCount,
}

impl From<AuthorListing> for AuthorListItem {
    fn from(l: AuthorListing) -> Self {
        Self {
            author: l.author.into(),
            count: RelationCount {
                books: l.book_count,
            },
        }
    }
}

/// Author with their books, for `GET`/`PUT /api/authors/{id}`.
#[derive(Debug, Serialize)]
pub struct AuthorDetailResponse {
    #[serde(flatten)]
    pub author: AuthorItem,
    pub books: Vec<BookItem>,
    #[serde(rename = "_count")]
    pub count: RelationCount,
}

impl From<AuthorDetail> for AuthorDetailResponse {
    fn from(d: AuthorDetail) -> Self {
        let count = RelationCount {
            books: d.book_count(),
        };

        Self {
            author: d.author.into(),
            books: d.books.into_iter().map(BookItem::from).collect(),
            count,
        }
    }
}

/// `{id, name}` reference to an author.
#[derive(Debug, Serialize)]
pub struct AuthorRef {
    pub id: i64,
    pub name: String,
}

/// Response of `GET /api/authors/{id}/books`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBooksResponse {
    pub author: AuthorRef,
    pub total_books: usize,
    pub books: Vec<BookItem>,
}

impl AuthorBooksResponse {
    pub fn new(author: Author, books: Vec<Book>) -> Self {
        Self {
            author: AuthorRef {
                id: author.id,
                name: author.name,
            },
            total_books: books.len(),
            books: books.into_iter().map(BookItem::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_request(value: serde_json::Value) -> CreateAuthorRequest {
        serde_json::from_value(value).unwrap()
    }

    fn update_request(value: serde_json::Value) -> UpdateAuthorRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_requires_name_and_email() {
        for body in [
            json!({"email": "a@b.co"}),
            json!({"name": "Ana"}),
            json!({"name": "", "email": "a@b.co"}),
            json!({"name": null, "email": "a@b.co"}),
        ] {
            let err = create_request(body).validate().unwrap_err();
            let err: crate::error::AppError = err.into();
            assert_eq!(err.to_string(), "Nombre y correo son obligatorios");
        }
    }

    #[test]
    fn test_create_does_not_check_email_format() {
        let req = create_request(json!({"name": "Ana", "email": "not-an-email"}));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_normalizes_form_values() {
        let new = create_request(json!({
            "name": "Julio Cortázar",
            "email": "jc@example.com",
            "bio": "",
            "nationality": "Argentina",
            "birthYear": "1914"
        }))
        .into_new_author();

        assert_eq!(new.bio, None);
        assert_eq!(new.nationality.as_deref(), Some("Argentina"));
        assert_eq!(new.birth_year, Some(1914));
    }

    #[test]
    fn test_update_rejects_bad_email() {
        let err = update_request(json!({"email": "user@localhost"}))
            .validate()
            .unwrap_err();
        let err: crate::error::AppError = err.into();
        assert_eq!(err.to_string(), "Email inválido");

        assert!(
            update_request(json!({"email": "user@example.org"}))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_update_rejects_empty_name() {
        let err = update_request(json!({"name": ""})).validate().unwrap_err();
        let err: crate::error::AppError = err.into();
        assert_eq!(err.to_string(), "El nombre no puede estar vacío");
    }

    #[test]
    fn test_update_tri_state() {
        let patch = update_request(json!({"name": null, "bio": null, "birthYear": 1920}))
            .into_patch();

        assert_eq!(patch.name, None);
        assert_eq!(patch.email, None);
        assert_eq!(patch.bio, Some(None));
        assert_eq!(patch.nationality, None);
        assert_eq!(patch.birth_year, Some(Some(1920)));
    }

    #[test]
    fn test_list_item_serializes_count() {
        let item = AuthorListItem {
            author: AuthorItem {
                id: 1,
                name: "Ana".to_string(),
                email: "ana@example.com".to_string(),
                bio: None,
                nationality: None,
                birth_year: Some(1950),
                created_at: Utc::now(),
            },
            count: RelationCount { books: 3 },
        };

        let value = serde_json::to_value(item).unwrap();
        assert_eq!(value["_count"]["books"], 3);
        assert_eq!(value["birthYear"], 1950);
        assert!(value["bio"].is_null());
        assert!(value.get("createdAt").is_some());
    }
}
