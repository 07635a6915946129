//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the
//! tide-calendar.toml file: which month the viewer opens on and how long the
//! loading screen lingers. Display preferences are not configured here; they
//! always start at their defaults.

use anyhow::Context;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "tide-calendar.toml";

/// Application configuration loaded from tide-calendar.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct Config {
    /// Period shown at startup
    pub viewer: ViewerConfig,
    /// Loading screen behavior
    pub loading: LoadingConfig,
}

/// Period the viewer opens on
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Month (1-12)
    pub month: u32,
    pub year: i32,
}

/// Loading screen configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoadingConfig {
    /// Pause before each lookup, in milliseconds (0 disables it)
    pub delay_ms: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        ViewerConfig {
            month: 9,
            year: 2025,
        }
    }
}

impl Config {
    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!(
                        "Loaded configuration from {} ({}/{})",
                        path.display(),
                        config.viewer.month,
                        config.viewer.year
                    );
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format in {}: {}", path.display(), e);
                    warn!("Using default configuration (9/2025)");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }

    /// Save configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self).context("serialize configuration")?;
        fs::write(path, contents)
            .with_context(|| format!("write configuration to {}", path.display()))?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    pub fn loading_delay(&self) -> Duration {
        Duration::from_millis(self.loading.delay_ms)
    }
}
