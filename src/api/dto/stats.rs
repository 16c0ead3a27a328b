//! Response for `GET /api/authors/{id}/stats`.

use serde::Serialize;

use crate::domain::entities::Author;
use crate::domain::stats::{AuthorStats, BookLength, BookMilestone};

/// `{title, year}` of a book; `year` is `null` when unknown.
#[derive(Debug, Serialize)]
pub struct MilestoneItem {
    pub title: String,
    pub year: Option<i32>,
}

impl From<BookMilestone> for MilestoneItem {
    fn from(m: BookMilestone) -> Self {
        Self {
            title: m.title,
            year: m.year,
        }
    }
}

/// `{title, pages}` of a book.
#[derive(Debug, Serialize)]
pub struct LengthItem {
    pub title: String,
    pub pages: i32,
}

impl From<BookLength> for LengthItem {
    fn from(l: BookLength) -> Self {
        Self {
            title: l.title,
            pages: l.pages,
        }
    }
}

/// Statistics over one author's books.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStatsResponse {
    pub author_id: i64,
    pub author_name: String,
    pub total_books: usize,
    pub first_book: Option<MilestoneItem>,
    pub latest_book: Option<MilestoneItem>,
    pub average_pages: i64,
    pub genres: Vec<String>,
    pub longest_book: Option<LengthItem>,
    pub shortest_book: Option<LengthItem>,
}

impl AuthorStatsResponse {
    pub fn new(author: Author, stats: AuthorStats) -> Self {
        Self {
            author_id: author.id,
            author_name: author.name,
            total_books: stats.total_books,
            first_book: stats.first_book.map(Into::into),
            latest_book: stats.latest_book.map(Into::into),
            average_pages: stats.average_pages,
            genres: stats.genres,
            longest_book: stats.longest_book.map(Into::into),
            shortest_book: stats.shortest_book.map(Into::into),
        }
    }
}
