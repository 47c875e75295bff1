use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::core::{
    services::PersistPolicy,
    utils::{ensure_dir, write_atomic, PathResolver},
};
use crate::errors::{FilterError, Result};

/// User preferences for the filter screens and the shell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub persist_policy: PersistPolicy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Overrides `<base>/state` as the selection store directory.
    pub store_dir: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Directory of catalog fixtures; the bundled catalogs are used when unset.
    pub catalog_dir: Option<PathBuf>,
    #[serde(default = "Config::default_true")]
    pub ui_color_enabled: bool,
    #[serde(default = "Config::default_true")]
    pub confirm_destructive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            persist_policy: PersistPolicy::default(),
            store_dir: None,
            catalog_dir: None,
            ui_color_enabled: true,
            confirm_destructive: true,
        }
    }
}

impl Config {
    fn default_true() -> bool {
        true
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(PathResolver::base_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        ensure_dir(&PathResolver::config_dir_in(&base))?;
        Ok(Self {
            path: PathResolver::config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str(&data).map_err(|err| FilterError::Config(err.to_string()))
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }
}
