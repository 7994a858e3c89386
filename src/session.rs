//! Edit session for connection settings.
//!
//! An [`EditBuffer`] is a working copy of the saved settings. Edits are
//! accepted as typed (empty hosts, non-numeric ports) and only take effect
//! once the buffer is saved; validity is left for the probe to discover.

use crate::endpoint::EndpointKind;
use crate::settings::PersistedSettings;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Editable field of an endpoint's connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Host,
    Port,
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "host" => Ok(Field::Host),
            "port" => Ok(Field::Port),
            _ => Err(format!("Unknown field: {}", s)),
        }
    }
}

/// Unsaved copy of [`PersistedSettings`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    settings: PersistedSettings,
}

impl EditBuffer {
    /// Start editing from `current`.
    pub fn begin(current: &PersistedSettings) -> Self {
        Self {
            settings: current.clone(),
        }
    }

    /// Buffer with one field replaced.
    #[must_use]
    pub fn set_field(
        mut self,
        endpoint: EndpointKind,
        field: Field,
        value: impl Into<String>,
    ) -> Self {
        let target = self.settings.endpoint_mut(endpoint);
        match field {
            Field::Host => target.host = value.into(),
            Field::Port => target.port = value.into(),
        }
        self
    }

    /// Whether any field differs from `saved`.
    pub fn is_dirty(&self, saved: &PersistedSettings) -> bool {
        EndpointKind::ALL.iter().any(|&kind| {
            let edited = self.settings.endpoint(kind);
            let saved = saved.endpoint(kind);
            edited.host != saved.host || edited.port != saved.port
        })
    }

    pub fn settings(&self) -> &PersistedSettings {
        &self.settings
    }
}
