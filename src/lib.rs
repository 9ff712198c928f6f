//! Core library surface for the home library manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as potential external tooling can reuse the same
//! pieces: the record model, the file-backed store, the catalog engine, and
//! the read-only statistics aggregator.
pub mod catalog;
pub mod models;
pub mod stats;
pub mod store;
pub mod ui;

/// The catalog engine: the owned in-memory book sequence plus its operations.
pub use catalog::{Catalog, CatalogError};

/// The validated record shape and the fixed enumerations around it.
pub use models::{Book, Genre, SearchField, ValidationError};

/// Derived read-only summaries of the current catalog.
pub use stats::LibraryStats;

/// Durable whole-catalog load/save over a single JSON file.
pub use store::{LibraryStore, StoreError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
