use crate::catalog::Catalog;
use crate::models::{Book, SearchField};
use crate::stats::LibraryStats;

/// One search result, carrying the book's catalog position so messages can
/// reference it. Books are cloned into the screen; the catalog stays the sole
/// owner of the live sequence and results are re-run after any mutation.
#[derive(Clone)]
pub(crate) struct SearchHit {
    pub(crate) index: usize,
    pub(crate) book: Book,
}

/// State for the search screen: the field selector, the query being typed,
/// and the results of the last executed search.
pub(crate) struct SearchScreen {
    pub(crate) field: SearchField,
    pub(crate) query: String,
    pub(crate) hits: Vec<SearchHit>,
    pub(crate) selected: usize,
    /// Distinguishes "no search run yet" from "a search ran and found
    /// nothing" so the empty state can phrase itself correctly.
    pub(crate) executed: bool,
}

impl SearchScreen {
    pub(crate) fn new() -> Self {
        Self {
            field: SearchField::Title,
            query: String::new(),
            hits: Vec::new(),
            selected: 0,
            executed: false,
        }
    }

    /// Advance the field selector: Title -> Author -> Genre -> Title.
    pub(crate) fn cycle_field(&mut self) {
        let position = SearchField::ALL
            .iter()
            .position(|field| *field == self.field)
            .unwrap_or(0);
        self.field = SearchField::ALL[(position + 1) % SearchField::ALL.len()];
    }

    /// Run the query against the catalog and snapshot the matches. A blank
    /// query intentionally yields nothing rather than everything.
    pub(crate) fn execute(&mut self, catalog: &Catalog) {
        self.hits = catalog
            .search(&self.query, self.field)
            .into_iter()
            .map(|(index, book)| SearchHit {
                index,
                book: book.clone(),
            })
            .collect();
        self.selected = 0;
        self.executed = true;
    }

    /// Move the result selection by `delta`, clamping at both ends.
    pub(crate) fn move_selection(&mut self, delta: isize) {
        if self.hits.is_empty() {
            self.selected = 0;
            return;
        }
        let last = self.hits.len() - 1;
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, last as isize) as usize;
    }
}

/// State for the statistics screen: a snapshot of the aggregations taken when
/// the screen opened. Reopening recomputes, so the view is never stale with
/// respect to the mutations that preceded it.
pub(crate) struct StatsScreen {
    pub(crate) stats: LibraryStats,
}

impl StatsScreen {
    pub(crate) fn new(catalog: &Catalog) -> Self {
        Self {
            stats: LibraryStats::from_books(catalog.books()),
        }
    }
}
