//! Configuration management for Sirocco
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files: the gateway block, the logging block, and
//! the per-platform device lists.

use crate::address::DeviceAddress;
use crate::error::{Result, SiroccoError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Bus gateway configuration
    pub gateway: GatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Cover devices
    #[serde(default)]
    pub covers: Vec<CoverConfig>,

    /// Climate controller devices
    #[serde(default)]
    pub climate: Vec<ClimateConfig>,

    /// Binary sensor devices
    #[serde(default)]
    pub binary_sensors: Vec<BinarySensorConfig>,
}

/// Bus gateway parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Unique gateway id, scopes entity ids and bus event types
    pub id: u32,

    /// Human-readable gateway name
    pub name: String,

    /// Base address the gateway sends from
    pub base_id: String,
}

/// Sender block for outbound commands; the sending address and profile may
/// differ from the receiving device's.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenderConfig {
    /// Sender address, textual form
    pub id: String,

    /// Sender equipment-profile id
    pub eep: String,
}

/// A configured cover device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverConfig {
    /// Device address, textual form
    pub id: String,

    /// Display name
    pub name: String,

    /// Status equipment-profile id
    pub eep: String,

    /// Outbound command sender
    pub sender: SenderConfig,

    /// Platform device class (e.g. "shutter", "blind")
    #[serde(default)]
    pub device_class: Option<String>,

    /// Seconds for a full closing travel
    #[serde(default)]
    pub time_closes: Option<u16>,

    /// Seconds for a full opening travel
    #[serde(default)]
    pub time_opens: Option<u16>,
}

/// A configured climate controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Device address, textual form
    pub id: String,

    /// Display name
    pub name: String,

    /// Status equipment-profile id
    pub eep: String,

    /// Outbound command sender
    pub sender: SenderConfig,
}

/// A configured binary sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinarySensorConfig {
    /// Device address, textual form, optionally with qualifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Equipment-profile id
    pub eep: String,

    /// Platform device class (e.g. "window", "door")
    #[serde(default)]
    pub device_class: Option<String>,

    /// Invert the decoded contact polarity
    #[serde(default)]
    pub invert_signal: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Base log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Console-specific level override
    #[serde(default)]
    pub console_level: Option<String>,

    /// File-specific level override
    #[serde(default)]
    pub file_level: Option<String>,

    /// Path to log file or log directory
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            id: 1,
            name: "gateway".to_string(),
            base_id: "FF-80-00-00".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            console_level: None,
            file_level: None,
            file: "/tmp/sirocco.log".to_string(),
            backup_count: 5,
            console_output: true,
            json_format: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            logging: LoggingConfig::default(),
            covers: Vec::new(),
            climate: Vec::new(),
            binary_sensors: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        let default_paths = [
            "sirocco_config.yaml",
            "/data/sirocco_config.yaml",
            "/etc/sirocco/config.yaml",
        ];

        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the gateway-level configuration.
    ///
    /// Device entries are resolved at setup time and skipped individually on
    /// error, so they are not rejected here.
    pub fn validate(&self) -> Result<()> {
        if self.gateway.name.is_empty() {
            return Err(SiroccoError::validation(
                "gateway.name",
                "Name cannot be empty",
            ));
        }

        if DeviceAddress::parse(&self.gateway.base_id).is_err() {
            return Err(SiroccoError::validation(
                "gateway.base_id",
                "Not a valid device address",
            ));
        }

        for cover in &self.covers {
            if cover.time_closes == Some(0) || cover.time_opens == Some(0) {
                return Err(SiroccoError::validation(
                    "covers.time_closes",
                    "Travel times must be positive when set",
                ));
            }
        }

        Ok(())
    }
}
