//! Application configuration loaded from TOML
//!
//! Every section and field is optional; anything missing falls back to the
//! defaults below.
//!
//! ```toml
//! [export]
//! directory = "/tmp/rspacer"
//!
//! [chart]
//! width = 800
//! height = 600
//!
//! [simulation]
//! satellites = ["NOAA-19", "METEOR-M2"]
//! samples = 48
//! interval_minutes = 30
//! ```

use std::path::{Path, PathBuf};

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Longest accepted spacing between simulated measurements (one week)
pub const MAX_INTERVAL_MINUTES: i64 = 7 * 24 * 60;

/// Most measurements generated per satellite
pub const MAX_SAMPLES: usize = 10_000;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`Config`]
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub export: ExportConfig,
    pub chart: ChartConfig,
    pub simulation: SimulationConfig,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// Output directory for CSV and chart images; `None` means the home directory
    pub directory: Option<PathBuf>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Satellites to generate data for
    pub satellites: Vec<String>,
    /// Measurements generated per satellite
    pub samples: usize,
    /// Minutes between consecutive measurements of one satellite
    pub interval_minutes: i64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            satellites: vec![
                "NOAA-19".to_string(),
                "METEOR-M2".to_string(),
                "ISS".to_string(),
            ],
            samples: 48,
            interval_minutes: 30,
        }
    }
}

impl SimulationConfig {
    /// Clamp out-of-range values into the accepted ranges
    pub fn sanitize(&mut self) {
        if !(1..=MAX_INTERVAL_MINUTES).contains(&self.interval_minutes) {
            let clamped = self.interval_minutes.clamp(1, MAX_INTERVAL_MINUTES);
            warn!(
                "interval_minutes = {} out of range, using {}",
                self.interval_minutes, clamped
            );
            self.interval_minutes = clamped;
        }

        if self.samples > MAX_SAMPLES {
            warn!("samples = {} too large, using {}", self.samples, MAX_SAMPLES);
            self.samples = MAX_SAMPLES;
        }
    }
}

impl Config {
    /// Parse a TOML document
    ///
    /// Simulation values outside their accepted ranges are clamped.
    pub fn from_toml_str(input: &str) -> ConfigResult<Self> {
        let mut config: Self = toml::from_str(input)?;
        config.simulation.sanitize();
        Ok(config)
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}
