//! Ratatui front-end for the library manager. The UI consumes the catalog
//! engine through its public operations and never holds a second copy of the
//! live book sequence; every mutation routes through `Catalog` so validation
//! and persistence stay in one place.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
