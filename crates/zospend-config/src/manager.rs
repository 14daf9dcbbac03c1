use std::{
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{Config, ConfigError};

const CONFIG_DIR_NAME: &str = "config";
const CONFIG_FILE_NAME: &str = "config.json";

/// Reads and writes the ledger's [`Config`] document.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `<base>/config/config.json`, creating the directory.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR_NAME);
        fs::create_dir_all(&config_dir).map_err(ConfigError::io(&config_dir))?;
        Ok(Self::new(config_dir.join(CONFIG_FILE_NAME)))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// A ledger that never saved preferences runs on [`Config::default`].
    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.config_path) {
            Ok(data) => data,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.config_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            Err(err) => return Err(ConfigError::io(&self.config_path)(err)),
        };
        serde_json::from_str(&data).map_err(ConfigError::invalid(&self.config_path))
    }

    /// Replaces the document in one rename so readers never see a partial file.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::io(parent))?;
        }
        let json =
            serde_json::to_string_pretty(config).map_err(ConfigError::invalid(&self.config_path))?;
        let staging = self.config_path.with_file_name(format!(
            ".{}.partial",
            self.config_path
                .file_name()
                .map(|name| name.to_string_lossy())
                .unwrap_or_default()
        ));
        write_synced(&staging, json.as_bytes())?;
        fs::rename(&staging, &self.config_path).map_err(ConfigError::io(&self.config_path))?;
        debug!(path = %self.config_path.display(), "config saved");
        Ok(())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<(), ConfigError> {
    let mut file = File::create(path).map_err(ConfigError::io(path))?;
    file.write_all(bytes).map_err(ConfigError::io(path))?;
    file.sync_all().map_err(ConfigError::io(path))
}
