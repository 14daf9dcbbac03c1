use std::{env, path::PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable overriding the default data directory.
pub const DATA_ROOT_ENV: &str = "ZOSPEND_HOME";
const DEFAULT_DATA_DIR: &str = ".zospend";

/// User preferences stored as `config/config.json` under the data root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Custom data directory. Defaults to `$ZOSPEND_HOME`, then `~/.zospend`.
    pub data_root: Option<PathBuf>,
    #[serde(default = "Config::default_group_by_category")]
    pub group_by_category: bool,
    #[serde(default)]
    pub seed_sample_data: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// `tracing` filter directive, e.g. `zospend=debug`.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_root: None,
            group_by_category: Self::default_group_by_category(),
            seed_sample_data: false,
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_group_by_category() -> bool {
        true
    }

    pub fn resolve_data_root(&self) -> PathBuf {
        if let Some(path) = &self.data_root {
            return path.clone();
        }
        Self::default_data_root()
    }

    /// `$ZOSPEND_HOME` when set and non-empty, otherwise `~/.zospend`.
    pub fn default_data_root() -> PathBuf {
        if let Some(custom) = env::var_os(DATA_ROOT_ENV).filter(|value| !value.is_empty()) {
            return PathBuf::from(custom);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DEFAULT_DATA_DIR)
    }
}
