// Configuration for the taskboard binary

use crate::kv::{FileKv, KeyValueStore, SqliteKv};
use clap::ValueEnum;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const APP_NAME: &str = "taskboard";
pub const CONFIG_FILE_NAME: &str = "config.yml";
pub const DB_FILE_NAME: &str = "taskboard.db";

/// Which key-value backend holds persisted state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Single SQLite database file
    #[default]
    Sqlite,
    /// One plain file per key
    Files,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    /// Where persisted state lives; platform data dir when unset
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// `<config dir>/taskboard/config.yml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration
    ///
    /// An explicit `path` must exist. Without one, the default location is used
    /// and a missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::read(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::read(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context(format!("Failed to read config file {:?}", path))?;
        let config = Self::from_yaml(&content).context(format!("Invalid config file {:?}", path))?;
        info!(path = ?path, backend = ?config.backend, "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is a valid, all-default config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| dirs::data_dir().map(|d| d.join(APP_NAME)))
            .ok_or_else(|| eyre!("Could not determine a data directory; set data_dir in the config"))
    }

    /// Open the configured backend
    pub fn open_backend(&self) -> Result<Box<dyn KeyValueStore>> {
        let dir = self.data_dir()?;
        let kv: Box<dyn KeyValueStore> = match self.backend {
            Backend::Sqlite => Box::new(SqliteKv::open(dir.join(DB_FILE_NAME))?),
            Backend::Files => Box::new(FileKv::open(dir)?),
        };
        Ok(kv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.backend, Backend::Sqlite);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_from_yaml() {
        let config = Config::from_yaml("backend: files\ndata_dir: /tmp/taskboard\n").unwrap();
        assert_eq!(config.backend, Backend::Files);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/taskboard")));
    }

    #[test]
    fn test_from_yaml_partial_and_empty() {
        let config = Config::from_yaml("backend: sqlite\n").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_from_yaml_rejects_unknown_backend() {
        assert!(Config::from_yaml("backend: postgres\n").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "backend: files\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.backend, Backend::Files);

        assert!(Config::load(Some(temp.path().join("missing.yml").as_path())).is_err());
    }

    #[test]
    fn test_open_backend_round_trip() {
        let temp = TempDir::new().unwrap();
        for backend in [Backend::Sqlite, Backend::Files] {
            let config = Config {
                backend,
                data_dir: Some(temp.path().join(format!("{:?}", backend))),
            };
            let mut kv = config.open_backend().unwrap();
            kv.set("theme", "dark").unwrap();

            let kv = config.open_backend().unwrap();
            assert_eq!(kv.get("theme").unwrap().as_deref(), Some("dark"));
        }

        let sqlite_dir = temp.path().join("Sqlite");
        assert!(sqlite_dir.join(DB_FILE_NAME).exists());
    }
}
