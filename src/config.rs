//! Configuration management for HID Timing Stats
//!
//! Holds the test-family parameters handed to the capture harness and the
//! interval filter profiles used by the report-rate statistics. The
//! configuration can be saved to and loaded from a platform-specific file.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/hid-timing-stats/config.toml` |
//! | macOS | `~/Library/Application Support/hid-timing-stats/config.toml` |
//! | Windows | `%APPDATA%\hid-timing-stats\config.toml` |
//!
//! ## Example
//!
//! ```no_run
//! use hid_timing_stats::Config;
//!
//! // Load existing config or use defaults
//! let mut config = Config::load().unwrap_or_default();
//!
//! // Modify settings
//! config.latency.trial_count = 50;
//!
//! // Save to disk
//! config.save().expect("Failed to save config");
//! ```

use crate::input::DeviceClass;
use crate::stats::FilterProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration operations
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file.
///
/// Creates the config directory if it doesn't exist.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    let app_dir = config_dir.join("hid-timing-stats");

    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }

    Ok(app_dir.join("config.toml"))
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Count-based latency trial settings
    #[serde(default)]
    pub latency: LatencyConfig,
    /// Duration-based report-rate window settings
    #[serde(default)]
    pub report_rate: ReportRateConfig,
    /// Interval filter profiles per device
    #[serde(default)]
    pub filters: FilterConfig,
}

/// Latency trial configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    /// Number of responses to collect per device
    pub trial_count: usize,
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self { trial_count: 20 }
    }
}

/// Report-rate sampling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportRateConfig {
    /// Sampling window length in milliseconds
    pub window_ms: u64,
}

impl Default for ReportRateConfig {
    fn default() -> Self {
        Self { window_ms: 5000 }
    }
}

/// Interval bounds for each device profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub pointer: FilterProfile,
    pub keyboard: FilterProfile,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            pointer: FilterProfile::POINTER,
            keyboard: FilterProfile::KEYBOARD,
        }
    }
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Report-rate window as a Duration
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.report_rate.window_ms)
    }

    /// Filter profile configured for a device
    pub fn profile_for(&self, device: DeviceClass) -> FilterProfile {
        match device {
            DeviceClass::Mouse => self.filters.pointer,
            DeviceClass::Keyboard => self.filters.keyboard,
        }
    }
}
