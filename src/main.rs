//! Binary entry point that glues the file-backed catalog engine to the TUI.
//! The bootstrapping pipeline is deliberately short: resolve the store under
//! the user's home directory, hydrate the catalog from the last saved
//! snapshot, and drive the Ratatui event loop until the user exits.
use home_library_manager::{run_app, App, Catalog, LibraryStore};

/// Initialize persistence, load the saved catalog, and launch the event loop.
///
/// A load failure does not abort: the catalog starts empty and the error is
/// carried into the first frame's footer so the user knows their file needs
/// attention before the next save overwrites it.
fn main() -> anyhow::Result<()> {
    let store = LibraryStore::open_default()?;
    let mut catalog = Catalog::new(store);

    let startup_warning = catalog
        .load_initial()
        .err()
        .map(|err| format!("Could not load saved library: {err}"));

    let mut app = App::new(catalog, startup_warning);
    run_app(&mut app)
}
