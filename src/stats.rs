//! Read-only summaries computed from the current catalog contents. The
//! aggregator never mutates the catalog and never touches the store; the
//! stats screen rebuilds it from scratch each time it opens, which is cheap
//! because everything here is a single pass plus one sort per grouping.

use crate::models::{Book, Genre};

/// Snapshot of the derived library metrics. The grouping vectors double as
/// ordered mappings: counts accumulate in first-encounter order and the final
/// stable sort keeps that order for equal counts.
pub struct LibraryStats {
    pub total_count: usize,
    pub read_count: usize,
    /// Genre -> count, most common first.
    pub by_genre: Vec<(Genre, usize)>,
    /// Author -> count, most common first.
    pub by_author: Vec<(String, usize)>,
    /// Decade bucket -> count, in chronological order. Decade trends are read
    /// left-to-right in time, so this one sorts by key rather than by count.
    pub by_decade: Vec<(i32, usize)>,
}

/// Bump the count for `key`, appending a fresh entry the first time the key
/// shows up. Linear scan on purpose: the number of distinct genres, authors,
/// or decades in a personal library is tiny.
fn bump<K: PartialEq>(counts: &mut Vec<(K, usize)>, key: K) {
    if let Some(entry) = counts.iter_mut().find(|(existing, _)| *existing == key) {
        entry.1 += 1;
    } else {
        counts.push((key, 1));
    }
}

impl LibraryStats {
    /// Aggregate over the given books in one pass, then sort each grouping.
    pub fn from_books(books: &[Book]) -> Self {
        let mut read_count = 0;
        let mut by_genre: Vec<(Genre, usize)> = Vec::new();
        let mut by_author: Vec<(String, usize)> = Vec::new();
        let mut by_decade: Vec<(i32, usize)> = Vec::new();

        for book in books {
            if book.read_status {
                read_count += 1;
            }
            bump(&mut by_genre, book.genre);
            bump(&mut by_author, book.author.clone());
            bump(&mut by_decade, book.decade());
        }

        // `sort_by` is stable, so equal counts keep first-encounter order.
        by_genre.sort_by(|a, b| b.1.cmp(&a.1));
        by_author.sort_by(|a, b| b.1.cmp(&a.1));
        by_decade.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            total_count: books.len(),
            read_count,
            by_genre,
            by_author,
            by_decade,
        }
    }

    /// Share of books marked read, 0.0 for an empty catalog.
    pub fn read_fraction(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.read_count as f64 / self.total_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Book;

    fn book(title: &str, author: &str, year: i32, genre: Genre, read: bool) -> Book {
        Book::validate(title, author, year, genre, read).unwrap()
    }

    #[test]
    fn empty_catalog_yields_zeroes_not_errors() {
        let stats = LibraryStats::from_books(&[]);
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.read_count, 0);
        assert_eq!(stats.read_fraction(), 0.0);
        assert!(stats.by_genre.is_empty());
        assert!(stats.by_author.is_empty());
        assert!(stats.by_decade.is_empty());
    }

    #[test]
    fn dune_and_1984_scenario() {
        let books = vec![
            book("Dune", "Frank Herbert", 1965, Genre::Fiction, false),
            book("1984", "George Orwell", 1949, Genre::Fiction, true),
        ];
        let stats = LibraryStats::from_books(&books);

        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.read_count, 1);
        assert_eq!(stats.read_fraction(), 0.5);
        assert_eq!(stats.by_genre, vec![(Genre::Fiction, 2)]);
        assert_eq!(stats.by_decade, vec![(1940, 1), (1960, 1)]);
    }

    #[test]
    fn groupings_sort_by_count_descending() {
        let books = vec![
            book("A", "Solo Author", 1950, Genre::Mystery, false),
            book("B", "Prolific Author", 1960, Genre::Fantasy, false),
            book("C", "Prolific Author", 1970, Genre::Fantasy, false),
            book("D", "Prolific Author", 1980, Genre::Fantasy, false),
        ];
        let stats = LibraryStats::from_books(&books);

        assert_eq!(
            stats.by_author,
            vec![
                ("Prolific Author".to_string(), 3),
                ("Solo Author".to_string(), 1),
            ]
        );
        assert_eq!(
            stats.by_genre,
            vec![(Genre::Fantasy, 3), (Genre::Mystery, 1)]
        );
    }

    #[test]
    fn equal_counts_keep_first_encounter_order() {
        let books = vec![
            book("A", "First Author", 1950, Genre::History, false),
            book("B", "Second Author", 1960, Genre::Biography, false),
            book("C", "First Author", 1970, Genre::History, false),
            book("D", "Second Author", 1980, Genre::Biography, false),
        ];
        let stats = LibraryStats::from_books(&books);

        assert_eq!(
            stats.by_author,
            vec![
                ("First Author".to_string(), 2),
                ("Second Author".to_string(), 2),
            ]
        );
        assert_eq!(
            stats.by_genre,
            vec![(Genre::History, 2), (Genre::Biography, 2)]
        );
    }

    #[test]
    fn decades_sort_chronologically_regardless_of_count() {
        let books = vec![
            book("A", "X", 1991, Genre::Fiction, false),
            book("B", "X", 1993, Genre::Fiction, false),
            book("C", "X", 1951, Genre::Fiction, false),
        ];
        let stats = LibraryStats::from_books(&books);
        assert_eq!(stats.by_decade, vec![(1950, 1), (1990, 2)]);
    }
}
