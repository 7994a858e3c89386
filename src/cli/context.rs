//! Shared setup for commands that need a running monitor

use crate::bridge::SystemBridge;
use crate::cli::Cli;
use crate::config::BeaconConfig;
use crate::monitor::MonitorController;
use crate::settings::{ConfigStore, FileStore, KeyValueStore, MemoryStore};
use std::sync::Arc;

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(cli: &Cli) -> Result<BeaconConfig, Box<dyn std::error::Error>> {
    // Load from file if it exists, otherwise use defaults
    let mut config = if cli.config.exists() {
        BeaconConfig::load(Some(&cli.config))?
    } else {
        tracing::debug!(path = %cli.config.display(), "Config file not found, using defaults");
        BeaconConfig::default()
    };

    config = config.with_env_overrides();

    // CLI overrides (highest priority)
    if let Some(ref store) = cli.store {
        config.store.path = Some(store.clone());
    }
    if let Some(ref log_level) = cli.log_level {
        config.logging.level = log_level.clone();
    }

    config.validate()?;
    Ok(config)
}

/// Build a monitor backed by the configured settings file and the system bridge.
pub fn build_monitor(
    config: &BeaconConfig,
) -> Result<Arc<MonitorController>, Box<dyn std::error::Error>> {
    let backend: Arc<dyn KeyValueStore> = match config.store.resolved_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "Using settings file");
            Arc::new(FileStore::new(path))
        }
        None => {
            tracing::warn!("No settings location available, changes will not persist");
            Arc::new(MemoryStore::new())
        }
    };

    let bridge = Arc::new(SystemBridge::new(config.probe.timeout())?);
    Ok(Arc::new(MonitorController::new(
        ConfigStore::new(backend),
        bridge,
        config,
    )))
}
