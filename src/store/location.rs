use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".home-library-manager";
/// Catalog file name stored inside the application data directory.
const LIBRARY_FILE_NAME: &str = "library.json";

/// Resolve the absolute path to the catalog file inside the user's home. This
/// is the application's single external configuration point; tests and tooling
/// bypass it by constructing a store at an explicit path.
pub(crate) fn default_library_path() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs
        .home_dir()
        .join(DATA_DIR_NAME)
        .join(LIBRARY_FILE_NAME))
}
