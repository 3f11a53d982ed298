//! Engine configuration, loaded from an optional TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Seconds between full re-discoveries of the host device layout.
pub const DEFAULT_REFRESH_PERIOD_SECS: f64 = 30.0;

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct EngineConfig {
    /// Refresh period for the group registry, in seconds.
    pub refresh_period_secs: f64,

    /// When set, a device may be claimed by at most one valid group at a
    /// time; later listings lose conflicts to earlier ones.
    pub exclusive_claims: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            refresh_period_secs: DEFAULT_REFRESH_PERIOD_SECS,
            exclusive_claims: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl EngineConfig {
    /// Default location of the config file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("articulator").join("config.toml"))
    }

    /// Loads the config file from the default location; a missing file is
    /// not an error and yields the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config = toml::from_str(&raw)?;
        info!("Loaded engine config from {}", path.display());
        Ok(config)
    }
}
