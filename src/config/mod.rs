//! Configuration module for Beacon
//!
//! Application configuration, loaded from a TOML file and layered with
//! environment variables and CLI flags. This is distinct from the persisted
//! connection settings in [`crate::settings`], which the user edits at runtime.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`BEACON_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use beacon::config::BeaconConfig;
//!
//! let toml = r#"
//! [probe]
//! timeout_seconds = 3
//! "#;
//! let config: BeaconConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.probe.timeout_seconds, 3);
//! assert_eq!(config.recovery.delay_ms, 3000);
//! ```

pub mod error;
pub mod logging;
pub mod probe;
pub mod recovery;
pub mod store;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use probe::ProbeConfig;
pub use recovery::{LaunchCommand, RecoveryConfig};
pub use store::StoreConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unified configuration for the monitor and its CLI.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BeaconConfig {
    /// Persisted settings location
    pub store: StoreConfig,
    /// Reachability probe settings
    pub probe: ProbeConfig,
    /// Launch commands and re-probe delay
    pub recovery: RecoveryConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl BeaconConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Invalid values are silently ignored (previous values are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("BEACON_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("BEACON_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }
        if let Ok(timeout) = std::env::var("BEACON_PROBE_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.probe.timeout_seconds = t;
            }
        }
        if let Ok(delay) = std::env::var("BEACON_RECOVERY_DELAY_MS") {
            if let Ok(d) = delay.parse() {
                self.recovery.delay_ms = d;
            }
        }
        if let Ok(path) = std::env::var("BEACON_STORE_PATH") {
            if !path.is_empty() {
                self.store.path = Some(PathBuf::from(path));
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "probe.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }

        for (field, command) in [
            ("recovery.inference", &self.recovery.inference),
            ("recovery.transcription", &self.recovery.transcription),
        ] {
            if let Some(command) = command {
                if command.program.trim().is_empty() {
                    return Err(ConfigError::Validation {
                        field: format!("{}.program", field),
                        message: "program cannot be empty".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_beacon_config_defaults() {
        let config = BeaconConfig::default();
        assert_eq!(config.probe.timeout_seconds, 5);
        assert_eq!(config.recovery.delay_ms, 3000);
        assert!(config.store.path.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_config_parse_full_toml() {
        let toml = include_str!("../../beacon.example.toml");
        let config: BeaconConfig = toml::from_str(toml).unwrap();
        assert!(config.probe.timeout_seconds > 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_partial_toml() {
        let toml = r#"
        [recovery]
        delay_ms = 250
        "#;
        let config: BeaconConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.recovery.delay_ms, 250);
        assert_eq!(config.probe.timeout_seconds, 5); // default
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[store]\npath = \"/tmp/beacon.json\"").unwrap();

        let config = BeaconConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.store.path, Some(PathBuf::from("/tmp/beacon.json")));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = BeaconConfig::load(Some(Path::new("/nonexistent/beacon.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_invalid_toml_error() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[probe\ntimeout_seconds = ").unwrap();

        let result = BeaconConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = BeaconConfig::load(None).unwrap();
        assert_eq!(config.probe.timeout_seconds, 5);
    }

    // Environment variables are process-global, so all override cases share
    // one test to avoid racing with each other.
    #[test]
    fn test_config_env_overrides() {
        std::env::set_var("BEACON_PROBE_TIMEOUT", "9");
        std::env::set_var("BEACON_RECOVERY_DELAY_MS", "not-a-number");
        std::env::set_var("BEACON_LOG_FORMAT", "json");
        std::env::set_var("BEACON_STORE_PATH", "/var/tmp/settings.json");
        let config = BeaconConfig::default().with_env_overrides();
        std::env::remove_var("BEACON_PROBE_TIMEOUT");
        std::env::remove_var("BEACON_RECOVERY_DELAY_MS");
        std::env::remove_var("BEACON_LOG_FORMAT");
        std::env::remove_var("BEACON_STORE_PATH");

        assert_eq!(config.probe.timeout_seconds, 9);
        assert_eq!(config.recovery.delay_ms, 3000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(
            config.store.path,
            Some(PathBuf::from("/var/tmp/settings.json"))
        );
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let mut config = BeaconConfig::default();
        config.probe.timeout_seconds = 0;

        let result = config.validate();
        assert!(matches!(
            result,
            Err(ConfigError::Validation { ref field, .. }) if field == "probe.timeout_seconds"
        ));
    }

    #[test]
    fn test_config_validation_empty_program() {
        let mut config = BeaconConfig::default();
        config.recovery.transcription = Some(LaunchCommand::new("  ", &[]));

        match config.validate() {
            Err(ConfigError::Validation { field, .. }) => {
                assert_eq!(field, "recovery.transcription.program");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
