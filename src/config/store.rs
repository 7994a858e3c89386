//! Settings storage configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where persisted connection settings are kept
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Settings file; the platform config directory is used when unset
    pub path: Option<PathBuf>,
}

impl StoreConfig {
    /// Resolved settings file path, if any is available.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        self.path
            .clone()
            .or_else(crate::settings::default_store_path)
    }
}
