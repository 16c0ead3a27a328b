//! PostgreSQL implementation of author repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Author, AuthorListing, AuthorPatch, NewAuthor};
use crate::domain::repositories::AuthorRepository;
use crate::error::AppError;

/// PostgreSQL repository for authors.
///
/// Email uniqueness is enforced by the `authors_email_key` constraint and
/// surfaces as [`AppError::Conflict`].
pub struct PgAuthorRepository {
    pool: Arc<PgPool>,
}

impl PgAuthorRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AuthorRow {
    id: i64,
    name: String,
    email: String,
    bio: Option<String>,
    nationality: Option<String>,
    birth_year: Option<i32>,
    created_at: DateTime<Utc>,
}

impl From<AuthorRow> for Author {
    fn from(r: AuthorRow) -> Self {
        Author::new(
            r.id,
            r.name,
            r.email,
            r.bio,
            r.nationality,
            r.birth_year,
            r.created_at,
        )
    }
}

#[derive(sqlx::FromRow)]
struct AuthorListingRow {
    #[sqlx(flatten)]
    author: AuthorRow,
    book_count: i64,
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    async fn create(&self, new_author: NewAuthor) -> Result<Author, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            INSERT INTO authors (name, email, bio, nationality, birth_year)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, bio, nationality, birth_year, created_at
            "#,
        )
        .bind(new_author.name)
        .bind(new_author.email)
        .bind(new_author.bio)
        .bind(new_author.nationality)
        .bind(new_author.birth_year)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, email, bio, nationality, birth_year, created_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Author>, AppError> {
        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            SELECT id, name, email, bio, nationality, birth_year, created_at
            FROM authors
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Author::from))
    }

    async fn list_with_book_counts(&self) -> Result<Vec<AuthorListing>, AppError> {
        let rows = sqlx::query_as::<_, AuthorListingRow>(
            r#"
            SELECT a.id, a.name, a.email, a.bio, a.nationality, a.birth_year, a.created_at,
                   COUNT(b.id) AS book_count
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            GROUP BY a.id
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AuthorListing {
                author: r.author.into(),
                book_count: r.book_count,
            })
            .collect())
    }

    async fn update(&self, id: i64, patch: AuthorPatch) -> Result<Author, AppError> {
        let update_bio = patch.bio.is_some();
        let update_nationality = patch.nationality.is_some();
        let update_birth_year = patch.birth_year.is_some();

        let row = sqlx::query_as::<_, AuthorRow>(
            r#"
            UPDATE authors SET
                name        = COALESCE($2::TEXT, name),
                email       = COALESCE($3::TEXT, email),
                bio         = CASE WHEN $4 THEN $5::TEXT ELSE bio END,
                nationality = CASE WHEN $6 THEN $7::TEXT ELSE nationality END,
                birth_year  = CASE WHEN $8 THEN $9::INTEGER ELSE birth_year END
            WHERE id = $1
            RETURNING id, name, email, bio, nationality, birth_year, created_at
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.email)
        .bind(update_bio)
        .bind(patch.bio.flatten())
        .bind(update_nationality)
        .bind(patch.nationality.flatten())
        .bind(update_birth_year)
        .bind(patch.birth_year.flatten())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Author::from)
            .ok_or_else(|| AppError::not_found("Author not found"))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM authors")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
