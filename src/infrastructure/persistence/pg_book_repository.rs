//! PostgreSQL implementation of book repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::sync::Arc;

use crate::domain::entities::{Author, Book, BookPatch, BookWithAuthor, NewBook};
use crate::domain::repositories::BookRepository;
use crate::domain::search::{BookFilter, BookPage, BookQuery, BookSort, SortOrder};
use crate::error::AppError;

/// Select list for a book joined with its author (`b` = books, `a` = authors).
const BOOK_WITH_AUTHOR_COLUMNS: &str = r#"
    b.id, b.title, b.description, b.isbn, b.published_year, b.genre, b.pages,
    b.created_at, b.author_id,
    a.name AS author_name, a.email AS author_email, a.bio AS author_bio,
    a.nationality AS author_nationality, a.birth_year AS author_birth_year,
    a.created_at AS author_created_at
"#;

/// PostgreSQL repository for books.
///
/// Search queries are assembled with [`QueryBuilder`]; the count and the
/// page share a single filter renderer.
pub struct PgBookRepository {
    pool: Arc<PgPool>,
}

impl PgBookRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: i64,
    title: String,
    description: Option<String>,
    isbn: Option<String>,
    published_year: Option<i32>,
    genre: Option<String>,
    pages: Option<i32>,
    created_at: DateTime<Utc>,
    author_id: i64,
}

impl From<BookRow> for Book {
    fn from(r: BookRow) -> Self {
        Book {
            id: r.id,
            title: r.title,
            description: r.description,
            isbn: r.isbn,
            published_year: r.published_year,
            genre: r.genre,
            pages: r.pages,
            created_at: r.created_at,
            author_id: r.author_id,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BookWithAuthorRow {
    #[sqlx(flatten)]
    book: BookRow,
    author_name: String,
    author_email: String,
    author_bio: Option<String>,
    author_nationality: Option<String>,
    author_birth_year: Option<i32>,
    author_created_at: DateTime<Utc>,
}

impl From<BookWithAuthorRow> for BookWithAuthor {
    fn from(r: BookWithAuthorRow) -> Self {
        let author = Author::new(
            r.book.author_id,
            r.author_name,
            r.author_email,
            r.author_bio,
            r.author_nationality,
            r.author_birth_year,
            r.author_created_at,
        );

        BookWithAuthor {
            book: r.book.into(),
            author,
        }
    }
}

/// Appends `WHERE ... AND ...` for the supplied conditions only.
///
/// Nothing is appended for an empty filter.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &BookFilter) {
    let mut conditions = Conditions { qb, first: true };

    if let Some(title) = &filter.title {
        conditions
            .next()
            .push("b.title ILIKE ")
            .push_bind(contains_pattern(title));
    }

    if let Some(genre) = &filter.genre {
        conditions.next().push("b.genre = ").push_bind(genre.clone());
    }

    if let Some(name) = &filter.author_name {
        conditions
            .next()
            .push("a.name ILIKE ")
            .push_bind(contains_pattern(name));
    }

    if let Some(author_id) = filter.author_id {
        conditions.next().push("b.author_id = ").push_bind(author_id);
    }
}

struct Conditions<'a, 'args> {
    qb: &'a mut QueryBuilder<'args, Postgres>,
    first: bool,
}

impl<'args> Conditions<'_, 'args> {
    fn next(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.qb.push(if self.first { " WHERE " } else { " AND " });
        self.first = false;
        &mut *self.qb
    }
}

fn push_order(qb: &mut QueryBuilder<'_, Postgres>, sort: BookSort) {
    let direction = sort.order.keyword();
    qb.push(" ORDER BY ")
        .push(sort.field.column())
        .push(" ")
        .push(direction)
        .push(", b.id ")
        .push(direction);
}

/// Builds an `ILIKE` pattern matching `term` anywhere, with wildcards in
/// the term itself escaped.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl BookRepository for PgBookRepository {
    async fn create(&self, new_book: NewBook) -> Result<BookWithAuthor, AppError> {
        let sql = format!(
            r#"
            WITH b AS (
                INSERT INTO books (title, description, isbn, published_year, genre, pages, author_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT {BOOK_WITH_AUTHOR_COLUMNS}
            FROM b
            JOIN authors a ON a.id = b.author_id
            "#
        );

        let row = sqlx::query_as::<_, BookWithAuthorRow>(&sql)
            .bind(new_book.title)
            .bind(new_book.description)
            .bind(new_book.isbn)
            .bind(new_book.published_year)
            .bind(new_book.genre)
            .bind(new_book.pages)
            .bind(new_book.author_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookWithAuthor>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOOK_WITH_AUTHOR_COLUMNS}
            FROM books b
            JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#
        );

        let row = sqlx::query_as::<_, BookWithAuthorRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(BookWithAuthor::from))
    }

    async fn list(&self) -> Result<Vec<BookWithAuthor>, AppError> {
        let sql = format!(
            r#"
            SELECT {BOOK_WITH_AUTHOR_COLUMNS}
            FROM books b
            JOIN authors a ON a.id = b.author_id
            ORDER BY b.created_at DESC, b.id DESC
            "#
        );

        let rows = sqlx::query_as::<_, BookWithAuthorRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(BookWithAuthor::from).collect())
    }

    async fn list_by_author(
        &self,
        author_id: i64,
        order: SortOrder,
    ) -> Result<Vec<Book>, AppError> {
        let direction = order.keyword();
        let sql = format!(
            r#"
            SELECT id, title, description, isbn, published_year, genre, pages, created_at, author_id
            FROM books
            WHERE author_id = $1
            ORDER BY published_year {direction}, id {direction}
            "#
        );

        let rows = sqlx::query_as::<_, BookRow>(&sql)
            .bind(author_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Book::from).collect())
    }

    async fn update(&self, id: i64, patch: BookPatch) -> Result<BookWithAuthor, AppError> {
        let update_description = patch.description.is_some();
        let update_isbn = patch.isbn.is_some();
        let update_published_year = patch.published_year.is_some();
        let update_genre = patch.genre.is_some();
        let update_pages = patch.pages.is_some();

        let sql = format!(
            r#"
            WITH b AS (
                UPDATE books SET
                    title          = COALESCE($2::TEXT, title),
                    description    = CASE WHEN $3 THEN $4::TEXT ELSE description END,
                    isbn           = CASE WHEN $5 THEN $6::TEXT ELSE isbn END,
                    published_year = CASE WHEN $7 THEN $8::INTEGER ELSE published_year END,
                    genre          = CASE WHEN $9 THEN $10::TEXT ELSE genre END,
                    pages          = CASE WHEN $11 THEN $12::INTEGER ELSE pages END,
                    author_id      = COALESCE($13::BIGINT, author_id)
                WHERE id = $1
                RETURNING *
            )
            SELECT {BOOK_WITH_AUTHOR_COLUMNS}
            FROM b
            JOIN authors a ON a.id = b.author_id
            "#
        );

        let row = sqlx::query_as::<_, BookWithAuthorRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(update_description)
            .bind(patch.description.flatten())
            .bind(update_isbn)
            .bind(patch.isbn.flatten())
            .bind(update_published_year)
            .bind(patch.published_year.flatten())
            .bind(update_genre)
            .bind(patch.genre.flatten())
            .bind(update_pages)
            .bind(patch.pages.flatten())
            .bind(patch.author_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(BookWithAuthor::from)
            .ok_or_else(|| AppError::not_found("Book not found"))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, query: &BookQuery) -> Result<BookPage<BookWithAuthor>, AppError> {
        let mut count_query = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) FROM books b JOIN authors a ON a.id = b.author_id",
        );
        push_filter(&mut count_query, &query.filter);

        let mut page_query = QueryBuilder::<Postgres>::new(format!(
            "SELECT {BOOK_WITH_AUTHOR_COLUMNS} FROM books b JOIN authors a ON a.id = b.author_id"
        ));
        push_filter(&mut page_query, &query.filter);
        push_order(&mut page_query, query.sort);
        page_query
            .push(" LIMIT ")
            .push_bind(query.page.limit())
            .push(" OFFSET ")
            .push_bind(query.page.offset());

        let (total, rows) = tokio::try_join!(
            count_query
                .build_query_scalar::<i64>()
                .fetch_one(self.pool.as_ref()),
            page_query
                .build_query_as::<BookWithAuthorRow>()
                .fetch_all(self.pool.as_ref())
        )?;

        Ok(BookPage {
            items: rows.into_iter().map(BookWithAuthor::from).collect(),
            total,
        })
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
