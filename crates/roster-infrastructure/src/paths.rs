//! Default filesystem locations for roster data.
//!
//! Configuration may name relative paths for the user document and the
//! upload directory; those resolve under the platform data directory so the
//! layout stays consistent across Linux, macOS and Windows.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/roster/       # Data directory (platform-dependent)
//! ├── users.json               # JSON backing document
//! ├── roster.db                # SQLite backing database
//! └── uploads/                 # Uploaded images, referenced by filename
//! ```

use std::path::{Path, PathBuf};

use roster_core::error::{Result, RosterError};

/// Unified path management for roster.
pub struct RosterPaths;

impl RosterPaths {
    /// Returns the roster data directory for the current platform.
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join("roster"))
            .ok_or_else(|| RosterError::config("cannot find data directory"))
    }

    /// Resolves a configured path: relative paths land under the data
    /// directory, absolute paths are used as-is.
    pub fn resolve(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        Ok(Self::data_dir()?.join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_path_is_unchanged() {
        let path = Path::new("/tmp/roster/users.json");
        assert_eq!(RosterPaths::resolve(path).unwrap(), path);
    }

    #[test]
    fn test_relative_path_resolves_under_data_dir() {
        let resolved = RosterPaths::resolve(Path::new("users.json")).unwrap();
        assert!(resolved.ends_with("roster/users.json"));
    }
}
