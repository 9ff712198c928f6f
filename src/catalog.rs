//! The catalog engine: the single in-memory collection of books plus every
//! mutating and querying operation over it. The engine exclusively owns the
//! record sequence for the lifetime of the process; the UI only ever sees
//! shared references, which is what keeps `date_added` immutable and the
//! insertion order canonical.

use thiserror::Error;

use crate::models::{Book, Genre, SearchField, ValidationError};
use crate::store::{LibraryStore, StoreError};

/// Errors surfaced by catalog operations. Validation and bounds failures leave
/// the in-memory state untouched; a store failure means the mutation already
/// happened and only the flush to disk went wrong.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("No book at position {index}; the library holds {len}.")]
    OutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// In-memory catalog bound to its persistence store. Every mutation runs to
/// completion synchronously: validate, apply, then flush the whole catalog to
/// disk before returning.
pub struct Catalog {
    books: Vec<Book>,
    store: LibraryStore,
}

impl Catalog {
    /// Wrap a store with an empty catalog. Call [`Catalog::load_initial`] once
    /// at startup to hydrate from the last saved snapshot.
    pub fn new(store: LibraryStore) -> Self {
        Self {
            books: Vec::new(),
            store,
        }
    }

    /// Populate the catalog from disk. On failure the catalog stays empty and
    /// the error is returned so the caller can warn the user instead of
    /// silently running over a corrupt file.
    pub fn load_initial(&mut self) -> Result<(), CatalogError> {
        self.books = Vec::new();
        self.books = self.store.load()?;
        Ok(())
    }

    /// Validate the raw inputs, append the new book to the end of the
    /// sequence, and flush. A validation failure performs no mutation at all;
    /// a flush failure keeps the appended book in memory (no rollback) so the
    /// next successful save reconciles the file.
    pub fn add(
        &mut self,
        title: &str,
        author: &str,
        publication_year: i32,
        genre: Genre,
        read_status: bool,
    ) -> Result<(), CatalogError> {
        let book = Book::validate(title, author, publication_year, genre, read_status)?;
        self.books.push(book);
        self.store.save(&self.books)?;
        Ok(())
    }

    /// Delete the book at `index`, shifting later positions down by one, and
    /// flush. An out-of-range index changes nothing.
    pub fn remove(&mut self, index: usize) -> Result<Book, CatalogError> {
        self.check_bounds(index)?;
        let book = self.books.remove(index);
        self.store.save(&self.books)?;
        Ok(book)
    }

    /// Flip the read flag of the book at `index` in place and flush. This is
    /// the only field a book allows to change after creation. Returns the new
    /// status so the UI can phrase its confirmation message.
    pub fn toggle_read_status(&mut self, index: usize) -> Result<bool, CatalogError> {
        self.check_bounds(index)?;
        let book = &mut self.books[index];
        book.read_status = !book.read_status;
        let status = book.read_status;
        self.store.save(&self.books)?;
        Ok(status)
    }

    /// Case-insensitive substring search over the chosen field, returning
    /// matches in original catalog order together with their positions. A
    /// blank term matches nothing: a stray Enter on an empty query should not
    /// select the entire library.
    pub fn search(&self, term: &str, field: SearchField) -> Vec<(usize, &Book)> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        self.books
            .iter()
            .enumerate()
            .filter(|(_, book)| {
                let haystack = match field {
                    SearchField::Title => book.title.to_lowercase(),
                    SearchField::Author => book.author.to_lowercase(),
                    SearchField::Genre => book.genre.label().to_lowercase(),
                };
                haystack.contains(&needle)
            })
            .collect()
    }

    /// The full sequence in canonical order.
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Where this catalog persists to, for startup diagnostics.
    pub fn store_path(&self) -> &std::path::Path {
        self.store.path()
    }

    fn check_bounds(&self, index: usize) -> Result<(), CatalogError> {
        if index < self.books.len() {
            Ok(())
        } else {
            Err(CatalogError::OutOfRange {
                index,
                len: self.books.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Catalog over a throwaway file. The `TempDir` guard must stay alive for
    /// the duration of the test or the directory vanishes under the store.
    fn scratch_catalog() -> (TempDir, Catalog) {
        let dir = TempDir::new().unwrap();
        let store = LibraryStore::at_path(dir.path().join("library.json"));
        (dir, Catalog::new(store))
    }

    fn seed_two_books(catalog: &mut Catalog) {
        catalog
            .add("Dune", "Frank Herbert", 1965, Genre::Fiction, false)
            .unwrap();
        catalog
            .add("1984", "George Orwell", 1949, Genre::Fiction, true)
            .unwrap();
    }

    #[test]
    fn add_appends_to_the_end_and_grows_by_one() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.books()[1].title, "1984");

        catalog
            .add("The Hobbit", "J.R.R. Tolkien", 1937, Genre::Fantasy, false)
            .unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.books().last().unwrap().title, "The Hobbit");
    }

    #[test]
    fn add_with_invalid_input_mutates_nothing() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        let err = catalog
            .add("", "Anonymous", 2000, Genre::Mystery, false)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::Validation(ValidationError::EmptyTitle)
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn duplicates_are_permitted() {
        let (_dir, mut catalog) = scratch_catalog();
        catalog
            .add("Dune", "Frank Herbert", 1965, Genre::Fiction, false)
            .unwrap();
        catalog
            .add("Dune", "Frank Herbert", 1965, Genre::Fiction, false)
            .unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn remove_shifts_later_positions_down() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        let removed = catalog.remove(0).unwrap();
        assert_eq!(removed.title, "Dune");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.books()[0].title, "1984");
    }

    #[test]
    fn out_of_range_index_is_reported_and_harmless() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        assert!(matches!(
            catalog.remove(5),
            Err(CatalogError::OutOfRange { index: 5, len: 2 })
        ));
        assert!(matches!(
            catalog.toggle_read_status(2),
            Err(CatalogError::OutOfRange { index: 2, len: 2 })
        ));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn toggle_read_status_is_its_own_inverse() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        assert!(catalog.toggle_read_status(0).unwrap());
        assert!(catalog.books()[0].read_status);
        assert!(!catalog.toggle_read_status(0).unwrap());
        assert!(!catalog.books()[0].read_status);
    }

    #[test]
    fn search_is_case_insensitive_and_keeps_catalog_order() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        let hits = catalog.search("dune", SearchField::Title);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].0, 0);
        assert_eq!(hits[0].1.title, "Dune");

        let by_genre = catalog.search("fic", SearchField::Genre);
        assert_eq!(
            by_genre.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn blank_search_matches_nothing() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);

        assert!(catalog.search("", SearchField::Title).is_empty());
        assert!(catalog.search("   ", SearchField::Author).is_empty());
    }

    #[test]
    fn every_mutation_flushes_a_reloadable_snapshot() {
        let (_dir, mut catalog) = scratch_catalog();
        seed_two_books(&mut catalog);
        catalog.toggle_read_status(0).unwrap();
        catalog.remove(1).unwrap();

        let store = LibraryStore::at_path(catalog.store_path());
        let mut reloaded = Catalog::new(store);
        reloaded.load_initial().unwrap();
        assert_eq!(reloaded.books(), catalog.books());
    }

    #[test]
    fn load_initial_failure_leaves_catalog_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("library.json");
        std::fs::write(&path, "not json").unwrap();

        let mut catalog = Catalog::new(LibraryStore::at_path(path));
        assert!(matches!(
            catalog.load_initial(),
            Err(CatalogError::Store(StoreError::Parse(_)))
        ));
        assert!(catalog.is_empty());
    }
}
