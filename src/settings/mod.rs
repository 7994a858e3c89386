//! Persisted connection settings.
//!
//! Settings live as one flat JSON record under a single storage key:
//!
//! ```json
//! { "lmStudioHost": "127.0.0.1", "lmStudioPort": "1234",
//!   "whisperHost": "127.0.0.1", "whisperPort": "8080" }
//! ```
//!
//! Loading never fails. Missing fields, non-string fields, or a record that
//! is not JSON at all fall back to the defaults field by field.

mod error;
mod store;
#[cfg(test)]
mod tests;

pub use error::*;
pub use store::*;

use crate::endpoint::{EndpointDescriptor, EndpointKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Storage key of the settings record.
pub const SETTINGS_KEY: &str = "beacon.localServerConfig";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_INFERENCE_PORT: &str = "1234";
pub const DEFAULT_TRANSCRIPTION_PORT: &str = "8080";

/// Host/port pair for one monitored service.
///
/// Both values are kept as raw strings; nothing checks that the host
/// resolves or that the port is numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub host: String,
    pub port: String,
}

impl EndpointConfig {
    pub fn new(host: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: port.into(),
        }
    }

    /// Default connection parameters for `kind`.
    pub fn default_for(kind: EndpointKind) -> Self {
        match kind {
            EndpointKind::Inference => Self::new(DEFAULT_HOST, DEFAULT_INFERENCE_PORT),
            EndpointKind::Transcription => Self::new(DEFAULT_HOST, DEFAULT_TRANSCRIPTION_PORT),
        }
    }
}

/// Connection settings for both monitored services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSettings {
    pub inference: EndpointConfig,
    pub transcription: EndpointConfig,
}

impl Default for PersistedSettings {
    fn default() -> Self {
        Self {
            inference: EndpointConfig::default_for(EndpointKind::Inference),
            transcription: EndpointConfig::default_for(EndpointKind::Transcription),
        }
    }
}

/// On-disk shape of [`PersistedSettings`].
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord<'a> {
    lm_studio_host: &'a str,
    lm_studio_port: &'a str,
    whisper_host: &'a str,
    whisper_port: &'a str,
}

impl PersistedSettings {
    pub fn endpoint(&self, kind: EndpointKind) -> &EndpointConfig {
        match kind {
            EndpointKind::Inference => &self.inference,
            EndpointKind::Transcription => &self.transcription,
        }
    }

    pub fn endpoint_mut(&mut self, kind: EndpointKind) -> &mut EndpointConfig {
        match kind {
            EndpointKind::Inference => &mut self.inference,
            EndpointKind::Transcription => &mut self.transcription,
        }
    }

    pub fn descriptor(&self, kind: EndpointKind) -> EndpointDescriptor {
        EndpointDescriptor::new(kind, self.endpoint(kind))
    }

    /// Parse a stored record, taking defaults for anything unusable.
    pub fn from_json_lenient(raw: &str) -> Self {
        let mut settings = Self::default();

        let record = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(record)) => record,
            Ok(_) => {
                tracing::warn!("Stored settings record is not an object, using defaults");
                return settings;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Stored settings record is corrupt, using defaults");
                return settings;
            }
        };

        // Numbers are kept in their text form; other non-string values fall back.
        let field = |name: &str| match record.get(name) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        };

        if let Some(host) = field("lmStudioHost") {
            settings.inference.host = host;
        }
        if let Some(port) = field("lmStudioPort") {
            settings.inference.port = port;
        }
        if let Some(host) = field("whisperHost") {
            settings.transcription.host = host;
        }
        if let Some(port) = field("whisperPort") {
            settings.transcription.port = port;
        }

        settings
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&StoredRecord {
            lm_studio_host: &self.inference.host,
            lm_studio_port: &self.inference.port,
            whisper_host: &self.transcription.host,
            whisper_port: &self.transcription.port,
        })
    }
}

/// Process-wide access point for persisted settings.
///
/// Cheap to clone; every clone reads and writes the same slot, so consumers
/// mounted in different places never hold drifting copies.
#[derive(Clone)]
pub struct ConfigStore {
    backend: Arc<dyn KeyValueStore>,
}

impl ConfigStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Store kept in memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Current settings, merged over the defaults.
    pub fn load(&self) -> PersistedSettings {
        match self.backend.get(SETTINGS_KEY) {
            Some(raw) => PersistedSettings::from_json_lenient(&raw),
            None => PersistedSettings::default(),
        }
    }

    /// Write `settings` to the slot.
    ///
    /// The error is logged here; callers that cannot act on it may drop it.
    pub fn save(&self, settings: &PersistedSettings) -> Result<(), StoreError> {
        let result = settings
            .to_json()
            .map_err(StoreError::from)
            .and_then(|raw| self.backend.set(SETTINGS_KEY, &raw));

        match &result {
            Ok(()) => tracing::debug!(
                inference = %settings.descriptor(EndpointKind::Inference).base_url(),
                transcription = %settings.descriptor(EndpointKind::Transcription).base_url(),
                "Saved local server settings"
            ),
            Err(e) => tracing::warn!(error = %e, "Failed to persist local server settings"),
        }

        result
    }
}
