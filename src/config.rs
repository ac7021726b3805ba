//! Application configuration, loadable from a JSON file.
//!
//! Every field has a default, so a file only needs the values it changes:
//!
//! ```json
//! { "data_path": "rates.csv", "offline": true, "generator": { "volatility": 0.005 } }
//! ```

use crate::simulation::generator::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid config '{path}': {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Persisted series; read when present, written after a fetch.
    pub data_path: PathBuf,
    /// Calendar days of history, ending today.
    pub history_days: i64,
    pub seed: u64,
    /// Starting rate of the unanchored fallback walk.
    pub initial_rate: f64,
    /// Skip every live quote source.
    pub offline: bool,
    /// Rows in the recent actual-vs-forecast table.
    pub recent_window: usize,
    pub histogram_bins: usize,
    pub generator: GeneratorConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("eur_usd.csv"),
            history_days: 730,
            seed: 42,
            initial_rate: 1.1000,
            offline: false,
            recent_window: 30,
            histogram_bins: 50,
            generator: GeneratorConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }
}
