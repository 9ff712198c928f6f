//! End-to-end exercise of the catalog engine against a real temp file: build
//! a small library, restart into a fresh catalog, and check that search and
//! statistics observe exactly the state the first process saved.

use home_library_manager::{Catalog, Genre, LibraryStats, LibraryStore, SearchField};
use tempfile::TempDir;

fn catalog_at(dir: &TempDir) -> Catalog {
    Catalog::new(LibraryStore::at_path(dir.path().join("library.json")))
}

#[test]
fn full_session_survives_a_restart() {
    let dir = TempDir::new().unwrap();

    // First "session": populate and mutate the library.
    let mut catalog = catalog_at(&dir);
    catalog.load_initial().expect("first run loads empty");
    assert!(catalog.is_empty());

    catalog
        .add("Dune", "Frank Herbert", 1965, Genre::ScienceFiction, false)
        .unwrap();
    catalog
        .add("1984", "George Orwell", 1949, Genre::Fiction, false)
        .unwrap();
    catalog
        .add("A Brief History of Time", "Stephen Hawking", 1988, Genre::NonFiction, false)
        .unwrap();
    catalog.toggle_read_status(1).unwrap();
    catalog.remove(2).unwrap();
    let saved_books = catalog.books().to_vec();

    // Second "session": a fresh engine over the same file.
    let mut restarted = catalog_at(&dir);
    restarted.load_initial().expect("reload succeeds");
    assert_eq!(restarted.books(), saved_books.as_slice());
    assert_eq!(restarted.len(), 2);

    // Search sees the restored records, case-insensitively.
    let hits = restarted.search("DUNE", SearchField::Title);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].1.title, "Dune");
    assert!(restarted.search("", SearchField::Title).is_empty());
    assert!(restarted.search("hawking", SearchField::Author).is_empty());

    // Statistics reflect the restored state: one of two books read.
    let stats = LibraryStats::from_books(restarted.books());
    assert_eq!(stats.total_count, 2);
    assert_eq!(stats.read_count, 1);
    assert_eq!(stats.read_fraction(), 0.5);
    assert_eq!(stats.by_decade, vec![(1940, 1), (1960, 1)]);
    assert_eq!(
        stats.by_genre,
        vec![(Genre::ScienceFiction, 1), (Genre::Fiction, 1)]
    );
}

#[test]
fn failed_operations_leave_the_snapshot_intact() {
    let dir = TempDir::new().unwrap();

    let mut catalog = catalog_at(&dir);
    catalog
        .add("Dune", "Frank Herbert", 1965, Genre::ScienceFiction, false)
        .unwrap();

    // Rejected add and out-of-range remove must not disturb disk state.
    assert!(catalog.add("", "Nobody", 2000, Genre::Mystery, false).is_err());
    assert!(catalog.remove(5).is_err());

    let mut reloaded = catalog_at(&dir);
    reloaded.load_initial().unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.books()[0].title, "Dune");
}
