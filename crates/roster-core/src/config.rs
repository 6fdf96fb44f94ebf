//! System configuration.
//!
//! The storage backing, the on-disk locations and the listen port are
//! declared at configuration time in a TOML file. A missing file yields the
//! default configuration; a file that exists but cannot be read or parsed is
//! an error.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RosterError};

/// The concrete storage technology satisfying the record store contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBacking {
    /// Flat JSON document, rewritten wholesale on every mutation
    #[default]
    Json,
    /// SQLite table, one statement per operation
    Sqlite,
}

/// Application configuration.
///
/// Relative paths are resolved by the composition root against the platform
/// data directory; absolute paths are used as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Which record store backing to construct
    pub backing: StorageBacking,
    /// JSON document path (json backing)
    pub data_file: PathBuf,
    /// Database URL (sqlite backing)
    pub database_url: String,
    /// Directory uploaded images are stored in
    pub upload_dir: PathBuf,
    /// Port the embedding server binds to
    pub listen_port: u16,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            backing: StorageBacking::default(),
            data_file: PathBuf::from("users.json"),
            database_url: "sqlite://roster.db".to_string(),
            upload_dir: PathBuf::from("uploads"),
            listen_port: 3000,
        }
    }
}

impl RosterConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Returns
    ///
    /// - `Ok(RosterConfig)`: Parsed configuration, or the defaults when the
    ///   file does not exist or is empty
    /// - `Err(_)`: The file exists but cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            RosterError::config(format!("failed to read config file {:?}: {e}", path))
        })?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = RosterConfig::load(Path::new("/nonexistent/roster.toml")).unwrap();
        assert_eq!(config.backing, StorageBacking::Json);
        assert_eq!(config.listen_port, 3000);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "backing = \"sqlite\"").unwrap();
        file.flush().unwrap();

        let config = RosterConfig::load(file.path()).unwrap();
        assert_eq!(config.backing, StorageBacking::Sqlite);
        assert_eq!(config.data_file, PathBuf::from("users.json"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "backing = [not toml").unwrap();
        file.flush().unwrap();

        assert!(RosterConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_config_round_trip() {
        let config = RosterConfig {
            backing: StorageBacking::Sqlite,
            listen_port: 8080,
            ..RosterConfig::default()
        };
        let toml_string = toml::to_string_pretty(&config).unwrap();
        let back: RosterConfig = toml::from_str(&toml_string).unwrap();
        assert_eq!(back.backing, StorageBacking::Sqlite);
        assert_eq!(back.listen_port, 8080);
    }
}
