//! Client configuration: one JSON document, path taken from the environment.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use arcship_core::error::{ConfigError, ScheduleError};
use arcship_core::{Bounds, ShipConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV: &str = "ARCSHIP_CONFIG";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(#[from] ConfigError),
}

/// Everything the host needs to start one ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub ship: ShipConfig,
    pub bounds: Bounds,
    /// JSON file holding stored client ids.
    pub id_file: PathBuf,
    /// Key the client id is stored under.
    pub id_key: String,
    /// Host timer period in milliseconds. Independent of the ship's beat.
    pub tick_interval_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            ship: ShipConfig::default(),
            bounds: Bounds::default(),
            id_file: PathBuf::from("arcship-id.json"),
            id_key: "arcship.id".to_string(),
            tick_interval_ms: 16,
        }
    }
}

impl ClientConfig {
    /// Loads from the file named by `ARCSHIP_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Self, LoadError> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Reads, parses and validates a config file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| LoadError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ScheduleError::ZeroInterval.into());
        }
        self.ship.validate()
    }

    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
