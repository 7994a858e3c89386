//! `[logging]` section.
//!
//! Beacon logs to stderr. The base `level` applies to every target, and
//! `component_levels` raises or lowers individual beacon modules, e.g.
//! `probe = "debug"` to see why a server is reported offline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected pretty or json)", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Base filter level. Quiet by default so command output stays readable.
    pub level: String,
    pub format: LogFormat,
    /// Per-module levels keyed by module name under `beacon::`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_levels: Option<HashMap<String, String>>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_quiet() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(config.component_levels.is_none());
    }

    #[test]
    fn test_section_with_component_levels() {
        let config: LoggingConfig = toml::from_str(
            "format = \"json\"\n[component_levels]\nprobe = \"debug\"\nlauncher = \"info\"\n",
        )
        .unwrap();
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, LogFormat::Json);
        let levels = config.component_levels.unwrap();
        assert_eq!(levels.get("probe").map(String::as_str), Some("debug"));
    }

    #[test]
    fn test_log_format_from_str() {
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert!("xml".parse::<LogFormat>().unwrap_err().contains("xml"));
    }
}
