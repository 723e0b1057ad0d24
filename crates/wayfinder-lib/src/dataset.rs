use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::debug;

use crate::error::{Error, Result};

/// Default filename for the graph database.
const DATABASE_FILENAME: &str = "wayfinder.db";

/// Environment variable that overrides the database location.
pub const DATABASE_PATH_ENV: &str = "WAYFINDER_DB_PATH";

/// Resolve the default database location using platform-specific project directories.
pub fn default_database_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("org", "wayfinder", "wayfinder").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATABASE_FILENAME))
}

/// Pick the database path: explicit override, then `WAYFINDER_DB_PATH`, then
/// the platform data directory.
///
/// An override naming an existing directory resolves to `wayfinder.db`
/// inside it.
pub fn resolve_database_path(override_path: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(expand_directory(path));
    }

    if let Ok(value) = env::var(DATABASE_PATH_ENV) {
        if !value.trim().is_empty() {
            debug!(env = DATABASE_PATH_ENV, path = %value, "using database path from environment");
            return Ok(expand_directory(Path::new(value.trim())));
        }
    }

    default_database_path()
}

fn expand_directory(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(DATABASE_FILENAME)
    } else {
        path.to_path_buf()
    }
}
