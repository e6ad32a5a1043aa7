//! # Configuration Module
//!
//! Handles loading and validating configuration from TOML files.

use serde::de::Error;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::port::find_port;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub uplink: UplinkConfig,

    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Uplink configuration
#[derive(Debug, Deserialize, Clone)]
pub struct UplinkConfig {
    /// Port number selecting which fields each frame carries
    #[serde(default = "default_port_number")]
    pub port_number: u8,

    /// Seconds between uplink frames
    #[serde(default = "default_interval_s")]
    pub interval_s: u64,
}

/// Telemetry logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetryConfig {
    #[serde(default = "default_telemetry_enabled")]
    pub enabled: bool,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_records_per_file")]
    pub max_records_per_file: usize,

    #[serde(default = "default_max_files_to_keep")]
    pub max_files_to_keep: usize,
}

// Default value functions
fn default_port_number() -> u8 { 5 }
fn default_interval_s() -> u64 { 60 }

fn default_telemetry_enabled() -> bool { true }
fn default_log_dir() -> String { "./logs".to_string() }
fn default_max_records_per_file() -> usize { 10000 }
fn default_max_files_to_keep() -> usize { 10 }

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            port_number: default_port_number(),
            interval_s: default_interval_s(),
        }
    }
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: default_telemetry_enabled(),
            log_dir: default_log_dir(),
            max_records_per_file: default_max_records_per_file(),
            max_files_to_keep: default_max_files_to_keep(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            uplink: UplinkConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// * `Result<Config>` - Loaded and validated configuration
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - TOML parsing fails
    /// - Validation fails
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use sense_link::config::Config;
    ///
    /// let config = Config::load("config/default.toml")?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Returns
    ///
    /// * `Result<()>` - Ok if valid, Err if invalid
    ///
    /// # Errors
    ///
    /// Returns error if any configuration value is out of valid range
    fn validate(&self) -> Result<()> {
        if find_port(self.uplink.port_number).is_none() {
            return Err(crate::error::SenseLinkError::Config(
                toml::de::Error::custom(format!(
                    "port_number {} is not a defined uplink port",
                    self.uplink.port_number
                )),
            ));
        }

        if self.uplink.interval_s == 0 || self.uplink.interval_s > 3600 {
            return Err(crate::error::SenseLinkError::Config(
                toml::de::Error::custom("interval_s must be between 1 and 3600"),
            ));
        }

        if self.telemetry.enabled && self.telemetry.log_dir.is_empty() {
            return Err(crate::error::SenseLinkError::Config(
                toml::de::Error::custom("telemetry log_dir cannot be empty when enabled"),
            ));
        }

        if self.telemetry.max_records_per_file == 0 {
            return Err(crate::error::SenseLinkError::Config(
                toml::de::Error::custom("max_records_per_file must be greater than 0"),
            ));
        }

        if self.telemetry.max_files_to_keep == 0 {
            return Err(crate::error::SenseLinkError::Config(
                toml::de::Error::custom("max_files_to_keep must be greater than 0"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.uplink.port_number, 5);
        assert_eq!(config.uplink.interval_s, 60);
        assert!(config.telemetry.enabled);
        assert_eq!(config.telemetry.log_dir, "./logs");
        assert_eq!(config.telemetry.max_records_per_file, 10000);
        assert_eq!(config.telemetry.max_files_to_keep, 10);
    }

    #[test]
    fn test_unknown_port_number() {
        let mut config = Config::default();
        config.uplink.port_number = 99;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_every_defined_port_validates() {
        for port in crate::port::PORT_LIST {
            let mut config = Config::default();
            config.uplink.port_number = port.port_number;
            assert!(
                config.validate().is_ok(),
                "port {} should be valid",
                port.port_number
            );
        }
    }

    #[test]
    fn test_interval_zero() {
        let mut config = Config::default();
        config.uplink.interval_s = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_interval_too_high() {
        let mut config = Config::default();
        config.uplink.interval_s = 3601;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_enabled() {
        let mut config = Config::default();
        config.telemetry.enabled = true;
        config.telemetry.log_dir = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_log_dir_when_disabled() {
        let mut config = Config::default();
        config.telemetry.enabled = false;
        config.telemetry.log_dir = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_max_records_per_file_zero() {
        let mut config = Config::default();
        config.telemetry.max_records_per_file = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_max_files_to_keep_zero() {
        let mut config = Config::default();
        config.telemetry.max_files_to_keep = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = r#"
[uplink]
port_number = 9
interval_s = 120

[telemetry]
enabled = false
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.uplink.port_number, 9);
        assert_eq!(config.uplink.interval_s, 120);
        assert!(!config.telemetry.enabled);
        // Unspecified fields fall back to their defaults
        assert_eq!(config.telemetry.max_files_to_keep, 10);
    }

    #[test]
    fn test_load_config_empty_file_uses_defaults() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"").unwrap();
        temp_file.flush().unwrap();

        let config = Config::load(temp_file.path()).unwrap();
        assert_eq!(config.uplink.port_number, 5);
    }

    #[test]
    fn test_load_config_rejects_unknown_port() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let toml_content = "[uplink]\nport_number = 200\n";

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        assert!(Config::load(temp_file.path()).is_err());
    }
}
