//! Runtime settings.
//!
//! Loaded from an optional TOML file; every field has a default so an empty
//! file (or no file) is valid.
//!
//! ```toml
//! gateway_url = "http://192.168.1.20:8080"
//! bus_caption = "Bus"
//! train_caption = "S-Bahn"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use platform::config::{DEPARTURE_ROWS, FORECAST_COLUMNS};
use serde::Deserialize;
use thiserror::Error;
use ui::Locale;

/// Default gateway address.
pub const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080";

/// Settings errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("cannot read settings file {}: {source}", path.display())]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid TOML or has unknown keys.
    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// The gateway URL is not an http(s) URL.
    #[error("gateway url must start with http:// or https://, got {0:?}")]
    GatewayUrl(String),

    /// A layout limit is zero.
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Base URL of the data gateway.
    pub gateway_url: String,
    /// Caption of the bus board.
    pub bus_caption: String,
    /// Caption of the train board.
    pub train_caption: String,
    /// Forecast strip width, counting the skipped current hour.
    pub forecast_columns: usize,
    /// Rows per departure board.
    pub departure_rows: usize,
    /// Weekday and month names.
    pub locale: Locale,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_owned(),
            bus_caption: "Buses".to_owned(),
            train_caption: "Trains".to_owned(),
            forecast_columns: FORECAST_COLUMNS,
            departure_rows: DEPARTURE_ROWS,
            locale: Locale::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a settings file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Reject settings the runtime cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gateway_url.starts_with("http://") || self.gateway_url.starts_with("https://")) {
            return Err(ConfigError::GatewayUrl(self.gateway_url.clone()));
        }
        if self.forecast_columns == 0 {
            return Err(ConfigError::Zero("forecast_columns"));
        }
        if self.departure_rows == 0 {
            return Err(ConfigError::Zero("departure_rows"));
        }
        Ok(())
    }
}
