//! Reachability prober.
//!
//! Turns a bridge status check into a plain boolean. Every failure mode
//! (refused connection, timeout, bad URL, error status, a bridge that never
//! answers) reads as unreachable, and a probe always resolves within the
//! configured timeout.

use crate::bridge::CommandBridge;
use crate::endpoint::{EndpointDescriptor, EndpointKind};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Result of probing one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub kind: EndpointKind,
    pub url: String,
    pub reachable: bool,
    pub latency_ms: u64,
}

/// Bounded-time liveness checks through a [`CommandBridge`].
#[derive(Clone)]
pub struct Prober {
    bridge: Arc<dyn CommandBridge>,
    timeout: Duration,
}

impl Prober {
    pub fn new(bridge: Arc<dyn CommandBridge>, timeout: Duration) -> Self {
        Self { bridge, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Whether `url` is reachable.
    pub async fn probe(&self, url: &str) -> bool {
        match tokio::time::timeout(self.timeout, self.bridge.check_server_status(url)).await {
            Ok(Ok(online)) => online,
            Ok(Err(e)) => {
                tracing::debug!(url, error = %e, "Probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(
                    url,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Probe timed out"
                );
                false
            }
        }
    }

    /// Probe the status path of `descriptor`.
    pub async fn probe_endpoint(&self, descriptor: &EndpointDescriptor) -> ProbeOutcome {
        let url = descriptor.probe_url();
        let start = Instant::now();
        let reachable = self.probe(&url).await;
        let latency = start.elapsed();

        metrics::histogram!("beacon_probe_latency_seconds",
            "endpoint" => descriptor.kind.as_str()
        )
        .record(latency.as_secs_f64());

        ProbeOutcome {
            kind: descriptor.kind,
            url,
            reachable,
            latency_ms: latency.as_millis() as u64,
        }
    }
}
