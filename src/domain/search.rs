//! Book search model: filter predicate, ordering and page window.
//!
//! A [`BookQuery`] is built once per request and handed to
//! [`BookRepository::search`](crate::domain::repositories::BookRepository::search).
//! Implementations must evaluate the count and the page against the same
//! [`BookFilter`] so that [`PageInfo`] agrees with the returned rows.

use std::cmp::Ordering;

use super::entities::{Author, Book};

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 50;

/// Conjunction of the supplied search conditions.
///
/// `None` means "condition not supplied" and never restricts the result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Exact genre.
    pub genre: Option<String>,
    /// Case-insensitive substring of the author's name.
    pub author_name: Option<String>,
    /// Exact owning author.
    pub author_id: Option<i64>,
}

impl BookFilter {
    /// Returns true if no condition was supplied.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.genre.is_none()
            && self.author_name.is_none()
            && self.author_id.is_none()
    }

    /// Evaluates the predicate against a book and its author.
    pub fn matches(&self, book: &Book, author: &Author) -> bool {
        if let Some(title) = &self.title
            && !contains_ignore_case(&book.title, title)
        {
            return false;
        }

        if let Some(genre) = &self.genre
            && book.genre.as_deref() != Some(genre.as_str())
        {
            return false;
        }

        if let Some(name) = &self.author_name
            && !contains_ignore_case(&author.name, name)
        {
            return false;
        }

        if let Some(author_id) = self.author_id
            && book.author_id != author_id
        {
            return false;
        }

        true
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Column a search result is ordered by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Title,
    PublishedYear,
    #[default]
    CreatedAt,
}

impl SortField {
    /// Parses the `sortBy` query value. Unknown values yield `None`.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "title" => Some(Self::Title),
            "publishedYear" => Some(Self::PublishedYear),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    /// SQL column for this field, qualified with the `b` books alias.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Title => "b.title",
            Self::PublishedYear => "b.published_year",
            Self::CreatedAt => "b.created_at",
        }
    }
}

/// Direction of the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Parses the `order` query value; anything but `asc` is descending.
    pub fn from_param(value: &str) -> Self {
        if value.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    /// Orients an ascending comparison.
    pub fn apply(&self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Ordering key and direction. Ties are broken by id in the same direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookSort {
    pub field: SortField,
    pub order: SortOrder,
}

impl BookSort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Compares two books the way PostgreSQL orders the same columns.
    ///
    /// NULL years sort as larger than any value: last when ascending,
    /// first when descending.
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        let primary = match self.field {
            SortField::Title => a.title.cmp(&b.title),
            SortField::PublishedYear => nulls_high(a.published_year, b.published_year),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };

        self.order.apply(primary.then_with(|| a.id.cmp(&b.id)))
    }
}

fn nulls_high(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
    }
}

/// Requested page window, already normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    limit: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl PageRequest {
    /// Normalizes raw values: page defaults to 1 with a floor of 1; limit
    /// defaults to [`DEFAULT_PAGE_SIZE`] and is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    /// Number of matching rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// Complete description of one search request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookQuery {
    pub filter: BookFilter,
    pub sort: BookSort,
    pub page: PageRequest,
}

/// Pagination metadata derived from the page window and the filtered total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PageInfo {
    /// Computes `totalPages = max(ceil(total / limit), 1)` and the
    /// neighbour flags.
    pub fn new(request: PageRequest, total: i64) -> Self {
        let limit = request.limit();
        let page = request.page();
        let total_pages = ((total.max(0) + limit - 1) / limit).max(1);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// One page of search results with the total that matched the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct BookPage<T> {
    pub items: Vec<T>,
    pub total: i64,
}
