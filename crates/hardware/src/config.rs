//! Session configuration.
//!
//! This module defines the structures used to parameterize a session. It provides:
//! 1. **Defaults:** Stock clock rates and the drive unit range.
//! 2. **Structures:** General settings, the drive list and the enabled user-port devices.
//! 3. **Loading:** JSON from a string or a file, followed by validation.
//!
//! Use `Config::default()` for a bare host with nothing attached.

use std::path::Path;

use serde::Deserialize;

use crate::common::ConfigError;
use crate::common::constants::{DRIVE_HZ, FIRST_DRIVE_UNIT, MAX_DRIVE_UNITS, PAL_HOST_HZ};
use crate::port::devices::RESOURCES;
use crate::sync::DriveOp;

/// Default configuration constants.
mod defaults {
    use super::{DRIVE_HZ, PAL_HOST_HZ};

    /// Host clock in Hz (PAL C64).
    pub const HOST_HZ: u64 = PAL_HOST_HZ;

    /// Drive CPU clock in Hz.
    pub const DRIVE_CLOCK_HZ: u64 = DRIVE_HZ;
}

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use retrobus_core::config::Config;
///
/// let json = r#"{
///     "general": { "host_hz": 1022727 },
///     "drives": [
///         { "unit": 8, "script": [{ "write": 90 }, { "idle": 100 }] },
///         { "unit": 9, "enabled": false }
///     ],
///     "userport": { "devices": ["UserportSNESPad"] }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.host_hz, 1_022_727);
/// assert_eq!(config.drives.len(), 2);
/// assert!(!config.drives[1].enabled);
/// assert_eq!(config.drives[0].clock_hz, 1_000_000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General session settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Drives plugged into the parallel cable, in connect order
    #[serde(default)]
    pub drives: Vec<DriveConfig>,
    /// User-port devices enabled at startup
    #[serde(default)]
    pub userport: UserportConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any error from
    /// [`validate`](Self::validate).
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`from_json`](Self::from_json).
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Checks drive unit numbers and resource keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDriveUnit`], [`ConfigError::DuplicateDriveUnit`]
    /// or [`ConfigError::UnknownResource`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let units = FIRST_DRIVE_UNIT..FIRST_DRIVE_UNIT + MAX_DRIVE_UNITS as u8;
        let mut seen = Vec::with_capacity(self.drives.len());
        for drive in &self.drives {
            if !units.contains(&drive.unit) {
                return Err(ConfigError::InvalidDriveUnit(drive.unit));
            }
            if seen.contains(&drive.unit) {
                return Err(ConfigError::DuplicateDriveUnit(drive.unit));
            }
            seen.push(drive.unit);
        }
        if let Some(unknown) = self
            .userport
            .devices
            .iter()
            .find(|key| !RESOURCES.contains(&key.as_str()))
        {
            return Err(ConfigError::UnknownResource(unknown.clone()));
        }
        Ok(())
    }
}

/// General session settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Host CPU clock in Hz
    #[serde(default = "GeneralConfig::default_host_hz")]
    pub host_hz: u64,

    /// Emit a trace event for every host bus access
    #[serde(default)]
    pub trace_bus: bool,
}

impl GeneralConfig {
    fn default_host_hz() -> u64 {
        defaults::HOST_HZ
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            host_hz: defaults::HOST_HZ,
            trace_bus: false,
        }
    }
}

/// One drive on the parallel cable.
#[derive(Debug, Clone, Deserialize)]
pub struct DriveConfig {
    /// IEC unit number (8-11)
    pub unit: u8,

    /// Powered on at startup
    #[serde(default = "DriveConfig::default_enabled")]
    pub enabled: bool,

    /// Drive CPU clock in Hz
    #[serde(default = "DriveConfig::default_clock_hz")]
    pub clock_hz: u64,

    /// Program for the drive's scripted CPU; empty means idle
    #[serde(default)]
    pub script: Vec<DriveOp>,
}

impl DriveConfig {
    /// Creates an enabled, idle drive at the stock clock.
    pub const fn new(unit: u8) -> Self {
        Self {
            unit,
            enabled: true,
            clock_hz: defaults::DRIVE_CLOCK_HZ,
            script: Vec::new(),
        }
    }

    fn default_enabled() -> bool {
        true
    }

    fn default_clock_hz() -> u64 {
        defaults::DRIVE_CLOCK_HZ
    }
}

/// User-port devices to enable when the session starts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserportConfig {
    /// Resource keys, registered in this order
    #[serde(default)]
    pub devices: Vec<String>,
}
