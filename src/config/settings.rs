//! Application settings loaded from an optional `config.toml`.
//!
//! Every field has a default, so a missing file is not an error. A file that
//! exists but does not parse is.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_SPLASH_DELAY_MS: u64 = 2000;
const DEFAULT_CURRENCY_PREFIX: &str = "Rp.";

/// Settings for the terminal front-end
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppSettings {
    /// Pause before the first screen is shown, in milliseconds
    pub splash_delay_ms: u64,
    /// Text printed in front of formatted prices
    pub currency_prefix: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            splash_delay_ms: DEFAULT_SPLASH_DELAY_MS,
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
        }
    }
}

/// Loads settings from a TOML file, using defaults when the file does not exist.
///
/// # Errors
/// Returns an error if:
/// - The file exists but cannot be read
/// - The TOML syntax is invalid or a field has the wrong type
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<AppSettings> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!("No settings file at {:?}, using defaults", path);
        return Ok(AppSettings::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read settings file {path:?}: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse settings file {path:?}: {e}"),
    })
}

/// Loads settings from the default location (./config.toml)
///
/// # Errors
/// See [`load_settings`].
pub fn load_default_settings() -> Result<AppSettings> {
    load_settings("config.toml")
}
