//! Author entity and its create/patch inputs.

use chrono::{DateTime, Utc};

use super::Book;

/// A person who owns zero or more books.
///
/// `email` is unique across all authors; the store enforces it with the
/// `authors_email_key` constraint.
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Author {
    /// Creates a new Author instance.
    pub fn new(
        id: i64,
        name: String,
        email: String,
        bio: Option<String>,
        nationality: Option<String>,
        birth_year: Option<i32>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            email,
            bio,
            nationality,
            birth_year,
            created_at,
        }
    }
}

/// An author together with the number of books they own.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorListing {
    pub author: Author,
    pub book_count: i64,
}

/// An author with their books, newest publication first.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDetail {
    pub author: Author,
    pub books: Vec<Book>,
}

impl AuthorDetail {
    pub fn book_count(&self) -> i64 {
        self.books.len() as i64
    }
}

/// Input data for creating a new author.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
}

/// Partial update for an existing author.
///
/// `None` fields are left unchanged. For nullable columns, `Some(None)`
/// clears the value and `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub bio: Option<Option<String>>,
    pub nationality: Option<Option<String>>,
    pub birth_year: Option<Option<i32>>,
}

impl AuthorPatch {
    /// Returns true if applying the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.bio.is_none()
            && self.nationality.is_none()
            && self.birth_year.is_none()
    }

    /// Applies the patch to an author in place.
    pub fn apply(&self, author: &mut Author) {
        if let Some(name) = &self.name {
            author.name = name.clone();
        }
        if let Some(email) = &self.email {
            author.email = email.clone();
        }
        if let Some(bio) = &self.bio {
            author.bio = bio.clone();
        }
        if let Some(nationality) = &self.nationality {
            author.nationality = nationality.clone();
        }
        if let Some(birth_year) = self.birth_year {
            author.birth_year = birth_year;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_author() -> Author {
        Author::new(
            1,
            "Ursula K. Le Guin".to_string(),
            "ursula@example.com".to_string(),
            Some("Novelist".to_string()),
            Some("US".to_string()),
            Some(1929),
            Utc::now(),
        )
    }

    #[test]
    fn test_author_creation() {
        let author = sample_author();

        assert_eq!(author.id, 1);
        assert_eq!(author.name, "Ursula K. Le Guin");
        assert_eq!(author.email, "ursula@example.com");
        assert_eq!(author.birth_year, Some(1929));
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let patch = AuthorPatch::default();
        assert!(patch.is_empty());

        let mut author = sample_author();
        let before = author.clone();
        patch.apply(&mut author);
        assert_eq!(author, before);
    }

    #[test]
    fn test_patch_sets_and_clears_fields() {
        let patch = AuthorPatch {
            name: Some("U. K. Le Guin".to_string()),
            bio: Some(None),
            birth_year: Some(Some(1930)),
            ..Default::default()
        };
        assert!(!patch.is_empty());

        let mut author = sample_author();
        patch.apply(&mut author);

        assert_eq!(author.name, "U. K. Le Guin");
        assert_eq!(author.email, "ursula@example.com");
        assert!(author.bio.is_none());
        assert_eq!(author.nationality.as_deref(), Some("US"));
        assert_eq!(author.birth_year, Some(1930));
    }

    #[test]
    fn test_detail_book_count() {
        let detail = AuthorDetail {
            author: sample_author(),
            books: vec![],
        };
        assert_eq!(detail.book_count(), 0);
    }
}
