//! Whole-file load/save of the catalog. The store deliberately replaces the
//! entire file on every save: the catalog is small enough that append logs or
//! partial updates would add complexity without benefit, and a full snapshot
//! makes recovery trivial because the file is always self-consistent.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::Book;

use super::location::default_library_path;

/// Errors raised by catalog load/save. Parse failures are kept distinct from
/// I/O failures so startup can tell a corrupt file apart from a missing
/// directory when it reports the problem.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("library file I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("library file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Handle to the on-disk catalog file. The store is the only component that
/// reads or writes this path; everything else goes through the catalog engine.
pub struct LibraryStore {
    path: PathBuf,
}

impl LibraryStore {
    /// Build a store over an explicit file path. Used directly by tests and by
    /// `open_default` once the home-directory path has been resolved.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the default catalog location under the user's home directory
    /// and make sure its parent folder exists, so the very first save does not
    /// trip over a missing directory.
    pub fn open_default() -> Result<Self> {
        let path = default_library_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("failed to create data directory")?;
        }
        Ok(Self::at_path(path))
    }

    /// Path of the backing file, shown in startup diagnostics.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full catalog from disk. A missing file is the normal first-run
    /// state and yields an empty catalog; an unreadable or malformed file is
    /// an error the caller must surface rather than silently discard.
    pub fn load(&self) -> Result<Vec<Book>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    /// Serialize the full catalog and replace the file contents in one logical
    /// operation. The payload is written to a sibling temp file first and then
    /// renamed over the target, so a load never observes a half-written
    /// snapshot even if the process dies mid-save.
    pub fn save(&self, books: &[Book]) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(books)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, payload)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
