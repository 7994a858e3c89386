//! Probe configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Reachability probe configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Upper bound for a single probe, including connect time
    pub timeout_seconds: u64,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self { timeout_seconds: 5 }
    }
}
