//! Per-endpoint reachability state.

use crate::endpoint::EndpointKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness classification of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReachabilityStatus {
    /// A probe is in flight (also the state before the first probe)
    Checking,
    /// The last probe succeeded
    Online,
    /// The last probe failed for any reason
    Offline,
}

impl ReachabilityStatus {
    pub fn from_reachable(reachable: bool) -> Self {
        if reachable {
            ReachabilityStatus::Online
        } else {
            ReachabilityStatus::Offline
        }
    }
}

/// Current status of one endpoint plus the probe cycle that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSnapshot {
    pub status: ReachabilityStatus,
    /// Probe cycle number; 0 means the endpoint was never probed
    pub generation: u64,
    /// When the latest terminal status was recorded
    pub last_checked: Option<DateTime<Utc>>,
    /// URL probed by the latest cycle
    pub url: Option<String>,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            status: ReachabilityStatus::Checking,
            generation: 0,
            last_checked: None,
            url: None,
        }
    }
}

impl StatusSnapshot {
    /// Whether the endpoint has never been probed.
    pub fn is_idle(&self) -> bool {
        self.generation == 0
    }
}

/// Status change published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEvent {
    pub endpoint: EndpointKind,
    pub status: ReachabilityStatus,
    pub generation: u64,
}
