// Configuration loading

use crate::storage::{FileStorage, SlotStorage, SqliteStorage, validate_key};
use crate::store::DEFAULT_STORAGE_KEY;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "taskmaster";
const CONFIG_FILE: &str = "config.yaml";

/// Where the task snapshot lives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    File,
    Sqlite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub backend: Backend,
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            data_dir: default_data_dir(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl Config {
    /// Load from an explicit path, else the user config file, else defaults
    ///
    /// An explicit path must exist; the user config file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        validate_key(&config.storage_key).context("Invalid storage_key in config")?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config {}", path.display()))?;
        info!(path = ?path, backend = ?config.backend, "Loaded config");
        Ok(config)
    }

    /// Open the configured storage backend
    pub fn open_storage(&self) -> Result<Box<dyn SlotStorage>> {
        let storage: Box<dyn SlotStorage> = match self.backend {
            Backend::File => Box::new(FileStorage::open(&self.data_dir)?),
            Backend::Sqlite => Box::new(SqliteStorage::open(&self.data_dir)?),
        };
        debug!(backend = ?self.backend, dir = ?self.data_dir, "Opened storage");
        Ok(storage)
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}
