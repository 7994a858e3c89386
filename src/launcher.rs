//! Recovery launcher.
//!
//! Starts a missing local server through the bridge. Launching is best
//! effort: a missing program, a server that is already running or a
//! permission problem is logged and reported to the caller, never escalated.
//! At most one launch per endpoint is in flight at a time.

use crate::bridge::{BridgeError, CommandBridge};
use crate::config::RecoveryConfig;
use crate::endpoint::EndpointKind;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Errors from a launch attempt.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no launch command configured for {0}")]
    NotConfigured(EndpointKind),

    #[error("launch of {kind} did not finish within {after_ms}ms")]
    TimedOut { kind: EndpointKind, after_ms: u64 },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

/// Marks a launch for one endpoint as in flight until dropped.
#[derive(Debug)]
pub struct LaunchGuard {
    kind: EndpointKind,
    flag: Arc<AtomicBool>,
}

impl LaunchGuard {
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }
}

impl Drop for LaunchGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Launches local servers and tracks which launches are in flight.
pub struct RecoveryLauncher {
    bridge: Arc<dyn CommandBridge>,
    config: RecoveryConfig,
    inference_in_flight: Arc<AtomicBool>,
    transcription_in_flight: Arc<AtomicBool>,
}

impl RecoveryLauncher {
    pub fn new(bridge: Arc<dyn CommandBridge>, config: RecoveryConfig) -> Self {
        Self {
            bridge,
            config,
            inference_in_flight: Arc::new(AtomicBool::new(false)),
            transcription_in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    fn flag(&self, kind: EndpointKind) -> &Arc<AtomicBool> {
        match kind {
            EndpointKind::Inference => &self.inference_in_flight,
            EndpointKind::Transcription => &self.transcription_in_flight,
        }
    }

    /// Claim the in-flight slot for `kind`.
    ///
    /// Returns `None` while another launch for `kind` holds it.
    pub fn try_begin(&self, kind: EndpointKind) -> Option<LaunchGuard> {
        let flag = self.flag(kind);
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| LaunchGuard {
                kind,
                flag: Arc::clone(flag),
            })
    }

    pub fn is_in_flight(&self, kind: EndpointKind) -> bool {
        self.flag(kind).load(Ordering::Acquire)
    }

    /// Invoke the configured start command for `kind`.
    pub async fn launch(&self, kind: EndpointKind) -> Result<(), LaunchError> {
        let result = match self.config.command_for(kind) {
            Some(command) => self
                .bridge
                .launch_local_server(kind, command)
                .await
                .map_err(LaunchError::from),
            None => Err(LaunchError::NotConfigured(kind)),
        };

        let outcome = if result.is_ok() { "started" } else { "failed" };
        metrics::counter!("beacon_launch_total",
            "endpoint" => kind.as_str(),
            "outcome" => outcome
        )
        .increment(1);

        match &result {
            Ok(()) => tracing::info!(endpoint = %kind, "Launch requested"),
            Err(e) => tracing::warn!(endpoint = %kind, error = %e, "Failed to launch local server"),
        }

        result
    }
}
