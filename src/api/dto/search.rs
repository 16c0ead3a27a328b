//! Query parameters and response for book search.

use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use super::book::BookItem;
use crate::domain::entities::{Author, BookWithAuthor};
use crate::domain::search::{
    BookFilter, BookQuery, BookSort, PageInfo, PageRequest, SortField, SortOrder,
};
use crate::error::AppError;

/// Query string of `GET /api/books/search`.
///
/// Every parameter is optional and an empty value counts as not supplied.
/// Values are kept as text so that malformed paging falls back to defaults
/// instead of rejecting the request.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub genre: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub author_name: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub author_id: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort_by: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub order: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<String>,
}

impl SearchParams {
    /// Normalizes the raw parameters into a search query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `authorId` is not an integer.
    pub fn into_query(self) -> Result<BookQuery, AppError> {
        let author_id = self
            .author_id
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| AppError::bad_request("authorId inválido"))
            })
            .transpose()?;

        let filter = BookFilter {
            title: self.search,
            genre: self.genre,
            author_name: self.author_name,
            author_id,
        };

        let sort = BookSort::new(
            self.sort_by
                .as_deref()
                .and_then(SortField::from_param)
                .unwrap_or_default(),
            self.order
                .as_deref()
                .map(SortOrder::from_param)
                .unwrap_or_default(),
        );

        let page = PageRequest::new(parse_number(self.page), parse_number(self.limit));

        Ok(BookQuery { filter, sort, page })
    }
}

/// Reads the leading integer of a value, so `2.5` is 2 and `3abc` is 3.
fn parse_number(raw: Option<String>) -> Option<i64> {
    let raw = raw?;
    let s = raw.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

/// `{id, name, email}` summary embedded in search results.
#[derive(Debug, Serialize)]
pub struct AuthorSummary {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl From<Author> for AuthorSummary {
    fn from(a: Author) -> Self {
        Self {
            id: a.id,
            name: a.name,
            email: a.email,
        }
    }
}

/// One search hit.
#[derive(Debug, Serialize)]
pub struct SearchItem {
    #[serde(flatten)]
    pub book: BookItem,
    pub author: AuthorSummary,
}

impl From<BookWithAuthor> for SearchItem {
    fn from(b: BookWithAuthor) -> Self {
        Self {
            book: b.book.into(),
            author: b.author.into(),
        }
    }
}

/// Pagination block of the search response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<PageInfo> for PaginationInfo {
    fn from(p: PageInfo) -> Self {
        Self {
            page: p.page,
            limit: p.limit,
            total: p.total,
            total_pages: p.total_pages,
            has_next: p.has_next,
            has_prev: p.has_prev,
        }
    }
}

/// Response of `GET /api/books/search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub data: Vec<SearchItem>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Decodes `k=v&k=v` into string values, as the query extractor does.
    fn params(query: &str) -> SearchParams {
        let pairs: serde_json::Map<String, serde_json::Value> = query
            .split('&')
            .filter(|p| !p.is_empty())
            .filter_map(|p| p.split_once('='))
            .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
            .collect();
        serde_json::from_value(serde_json::Value::Object(pairs)).unwrap()
    }

    #[test]
    fn test_defaults() {
        let query = params("").into_query().unwrap();

        assert!(query.filter.is_empty());
        assert_eq!(query.sort.field, SortField::CreatedAt);
        assert_eq!(query.sort.order, SortOrder::Desc);
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.limit(), 10);
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let query = params("search=&genre=&authorName=&authorId=&page=&limit=")
            .into_query()
            .unwrap();

        assert!(query.filter.is_empty());
        assert_eq!(query.page, PageRequest::default());
    }

    #[test]
    fn test_full_query() {
        let query = params(
            "search=ciudad&genre=Novela&authorName=vargas&authorId=3&sortBy=title&order=asc&page=2&limit=5",
        )
        .into_query()
        .unwrap();

        assert_eq!(query.filter.title.as_deref(), Some("ciudad"));
        assert_eq!(query.filter.genre.as_deref(), Some("Novela"));
        assert_eq!(query.filter.author_name.as_deref(), Some("vargas"));
        assert_eq!(query.filter.author_id, Some(3));
        assert_eq!(query.sort, BookSort::new(SortField::Title, SortOrder::Asc));
        assert_eq!(query.page.offset(), 5);
    }

    #[test]
    fn test_malformed_paging_falls_back() {
        let query = params("page=abc&limit=lots&sortBy=rating&order=up")
            .into_query()
            .unwrap();

        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.limit(), 10);
        assert_eq!(query.sort, BookSort::default());
    }

    #[test]
    fn test_paging_reads_leading_digits() {
        let query = params("page=2.5&limit=3abc").into_query().unwrap();
        assert_eq!(query.page.page(), 2);
        assert_eq!(query.page.limit(), 3);

        let query = params("page=-4&limit=x7").into_query().unwrap();
        assert_eq!(query.page.page(), 1);
        assert_eq!(query.page.limit(), 10);
    }

    #[test]
    fn test_limit_is_clamped() {
        let query = params("limit=500&page=-2").into_query().unwrap();
        assert_eq!(query.page.limit(), 50);
        assert_eq!(query.page.page(), 1);
    }

    #[test]
    fn test_invalid_author_id_is_rejected() {
        let err = params("authorId=abc").into_query().unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
