//! Endpoint descriptors for the monitored local services.
//!
//! A descriptor binds an [`EndpointKind`] to the host/port pair it was built
//! from. Host and port are pasted into the URL verbatim: a malformed value
//! produces a malformed URL, which later shows up as an offline probe rather
//! than a construction error.

use crate::settings::EndpointConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two local services tracked by the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndpointKind {
    /// OpenAI-compatible inference server (LM Studio)
    Inference,
    /// Speech transcription server (Whisper)
    Transcription,
}

impl EndpointKind {
    /// Both kinds, in display order.
    pub const ALL: [EndpointKind; 2] = [EndpointKind::Inference, EndpointKind::Transcription];

    /// Well-known path answered by a live server of this kind.
    pub fn status_path(self) -> &'static str {
        match self {
            EndpointKind::Inference => "/v1/models",
            EndpointKind::Transcription => "/",
        }
    }

    /// Human-readable product name.
    pub fn display_name(self) -> &'static str {
        match self {
            EndpointKind::Inference => "LM Studio",
            EndpointKind::Transcription => "Whisper",
        }
    }

    /// Lowercase identifier used in logs, metrics labels and the CLI.
    pub fn as_str(self) -> &'static str {
        match self {
            EndpointKind::Inference => "inference",
            EndpointKind::Transcription => "transcription",
        }
    }
}

impl fmt::Display for EndpointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EndpointKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "inference" | "lmstudio" | "lm-studio" => Ok(EndpointKind::Inference),
            "transcription" | "whisper" => Ok(EndpointKind::Transcription),
            _ => Err(format!("Unknown endpoint: {}", s)),
        }
    }
}

/// A named service bound to a concrete host and port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub kind: EndpointKind,
    pub host: String,
    pub port: String,
}

impl EndpointDescriptor {
    pub fn new(kind: EndpointKind, config: &EndpointConfig) -> Self {
        Self {
            kind,
            host: config.host.clone(),
            port: config.port.clone(),
        }
    }

    /// Base URL in the form `http://{host}:{port}`.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Fully-qualified URL the prober requests.
    pub fn probe_url(&self) -> String {
        format!("{}{}", self.base_url(), self.kind.status_path())
    }
}
