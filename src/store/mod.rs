//! Persistence module split across logical submodules.

mod file;
mod location;

pub use file::{LibraryStore, StoreError};
