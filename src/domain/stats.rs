//! Per-author descriptive statistics computed from a list of books.

use super::entities::Book;

/// Title and publication year of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookMilestone {
    pub title: String,
    pub year: Option<i32>,
}

/// Title and page count of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookLength {
    pub title: String,
    pub pages: i32,
}

/// Aggregate statistics over one author's books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorStats {
    pub total_books: usize,
    pub first_book: Option<BookMilestone>,
    pub latest_book: Option<BookMilestone>,
    pub average_pages: i64,
    pub genres: Vec<String>,
    pub longest_book: Option<BookLength>,
    pub shortest_book: Option<BookLength>,
}

impl AuthorStats {
    /// Computes statistics in a single left-to-right pass.
    ///
    /// `books` is expected in ascending publication order: the first element
    /// is reported as `first_book`. `latest_book` is the greatest year with a
    /// missing year counted as 0. Ties on year or page count keep the first
    /// book encountered. Empty input yields zero/empty/`None` everywhere.
    pub fn from_books(books: &[Book]) -> Self {
        let mut latest: Option<&Book> = None;
        let mut longest: Option<(&Book, i32)> = None;
        let mut shortest: Option<(&Book, i32)> = None;
        let mut page_sum: i64 = 0;
        let mut page_count: i64 = 0;
        let mut genres: Vec<String> = Vec::new();

        for book in books {
            if latest.is_none_or(|l| year_or_zero(book) > year_or_zero(l)) {
                latest = Some(book);
            }

            if let Some(pages) = book.pages {
                page_sum += i64::from(pages);
                page_count += 1;

                if longest.is_none_or(|(_, max)| pages > max) {
                    longest = Some((book, pages));
                }
                if shortest.is_none_or(|(_, min)| pages < min) {
                    shortest = Some((book, pages));
                }
            }

            if let Some(genre) = book.genre.as_deref()
                && !genre.is_empty()
                && !genres.iter().any(|g| g == genre)
            {
                genres.push(genre.to_string());
            }
        }

        Self {
            total_books: books.len(),
            first_book: books.first().map(milestone),
            latest_book: latest.map(milestone),
            average_pages: rounded_mean(page_sum, page_count),
            genres,
            longest_book: longest.map(length),
            shortest_book: shortest.map(length),
        }
    }
}

fn year_or_zero(book: &Book) -> i32 {
    book.published_year.unwrap_or(0)
}

fn milestone(book: &Book) -> BookMilestone {
    BookMilestone {
        title: book.title.clone(),
        year: book.published_year,
    }
}

fn length((book, pages): (&Book, i32)) -> BookLength {
    BookLength {
        title: book.title.clone(),
        pages,
    }
}

/// Mean rounded half away from zero; 0 when there is nothing to average.
fn rounded_mean(sum: i64, count: i64) -> i64 {
    if count == 0 {
        return 0;
    }
    (sum as f64 / count as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(id: i64, title: &str, year: Option<i32>, pages: Option<i32>, genre: Option<&str>) -> Book {
        Book {
            id,
            title: title.to_string(),
            description: None,
            isbn: None,
            published_year: year,
            genre: genre.map(str::to_string),
            pages,
            created_at: Utc::now(),
            author_id: 1,
        }
    }

    #[test]
    fn test_empty_input() {
        let stats = AuthorStats::from_books(&[]);

        assert_eq!(stats, AuthorStats::default());
        assert_eq!(stats.total_books, 0);
        assert!(stats.first_book.is_none());
        assert!(stats.latest_book.is_none());
        assert_eq!(stats.average_pages, 0);
        assert!(stats.genres.is_empty());
        assert!(stats.longest_book.is_none());
        assert!(stats.shortest_book.is_none());
    }

    #[test]
    fn test_full_statistics() {
        let books = vec![
            book(1, "Rocannon's World", Some(1966), Some(117), Some("Science Fiction")),
            book(2, "A Wizard of Earthsea", Some(1968), Some(183), Some("Fantasy")),
            book(3, "The Left Hand of Darkness", Some(1969), Some(286), Some("Science Fiction")),
            book(4, "Untitled draft", None, None, None),
        ];

        let stats = AuthorStats::from_books(&books);

        assert_eq!(stats.total_books, 4);
        assert_eq!(
            stats.first_book,
            Some(BookMilestone {
                title: "Rocannon's World".to_string(),
                year: Some(1966)
            })
        );
        assert_eq!(
            stats.latest_book,
            Some(BookMilestone {
                title: "The Left Hand of Darkness".to_string(),
                year: Some(1969)
            })
        );
        // (117 + 183 + 286) / 3 = 195.33
        assert_eq!(stats.average_pages, 195);
        assert_eq!(stats.genres, vec!["Science Fiction", "Fantasy"]);
        assert_eq!(
            stats.longest_book,
            Some(BookLength {
                title: "The Left Hand of Darkness".to_string(),
                pages: 286
            })
        );
        assert_eq!(
            stats.shortest_book,
            Some(BookLength {
                title: "Rocannon's World".to_string(),
                pages: 117
            })
        );
    }

    #[test]
    fn test_average_rounds_half_up() {
        let books = vec![
            book(1, "One", None, Some(100), None),
            book(2, "Two", None, Some(101), None),
        ];

        assert_eq!(AuthorStats::from_books(&books).average_pages, 101);
    }

    #[test]
    fn test_books_without_pages() {
        let books = vec![book(1, "Only", Some(2000), None, Some("Essay"))];
        let stats = AuthorStats::from_books(&books);

        assert_eq!(stats.total_books, 1);
        assert_eq!(stats.average_pages, 0);
        assert!(stats.longest_book.is_none());
        assert!(stats.shortest_book.is_none());
        assert_eq!(stats.first_book, stats.latest_book);
    }

    #[test]
    fn test_page_ties_keep_first_encountered() {
        let books = vec![
            book(1, "First long", None, Some(300), None),
            book(2, "Second long", None, Some(300), None),
            book(3, "First short", None, Some(50), None),
            book(4, "Second short", None, Some(50), None),
        ];

        let stats = AuthorStats::from_books(&books);

        assert_eq!(stats.longest_book.unwrap().title, "First long");
        assert_eq!(stats.shortest_book.unwrap().title, "First short");
    }

    #[test]
    fn test_latest_treats_missing_year_as_zero() {
        let books = vec![
            book(1, "Dated", Some(-50), None, None),
            book(2, "Undated", None, None, None),
        ];

        let stats = AuthorStats::from_books(&books);
        assert_eq!(stats.latest_book.unwrap().title, "Undated");

        let books = vec![
            book(1, "Undated", None, None, None),
            book(2, "Also undated", None, None, None),
        ];
        let stats = AuthorStats::from_books(&books);
        assert_eq!(stats.latest_book.unwrap().title, "Undated");
    }

    #[test]
    fn test_genres_skip_empty_and_duplicates() {
        let books = vec![
            book(1, "A", None, None, Some("Poetry")),
            book(2, "B", None, None, Some("")),
            book(3, "C", None, None, Some("Poetry")),
            book(4, "D", None, None, Some("Essay")),
        ];

        assert_eq!(
            AuthorStats::from_books(&books).genres,
            vec!["Poetry".to_string(), "Essay".to_string()]
        );
    }

    #[test]
    fn test_longest_never_shorter_than_shortest() {
        let page_sets: [&[i32]; 4] = [&[1], &[5, 3, 9], &[7, 7, 7], &[400, 12, 399, 13]];

        for pages in page_sets {
            let books: Vec<_> = pages
                .iter()
                .enumerate()
                .map(|(i, p)| book(i as i64, "T", None, Some(*p), None))
                .collect();
            let stats = AuthorStats::from_books(&books);

            assert!(stats.longest_book.unwrap().pages >= stats.shortest_book.unwrap().pages);
        }
    }
}
