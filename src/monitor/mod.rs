//! Monitor controller.
//!
//! Owns the live settings snapshot and the reachability status of both
//! endpoints. Probing is event driven only: opening the panel, an explicit
//! refresh, a save, or the delayed follow-up after a launch. There is no
//! background polling.
//!
//! Every probe cycle bumps a per-endpoint generation. A probe result is
//! applied only if no newer cycle has started for that endpoint, so a slow
//! probe finishing late cannot overwrite a fresher status.

mod status;


pub use status::*;

use crate::bridge::CommandBridge;
use crate::config::BeaconConfig;
use crate::endpoint::EndpointKind;
use crate::launcher::{LaunchError, RecoveryLauncher};
use crate::probe::{ProbeOutcome, Prober};
use crate::session::{EditBuffer, Field};
use crate::settings::{ConfigStore, PersistedSettings};
use dashmap::DashMap;
use futures::future::join_all;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

/// Capacity of the status event channel.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Outcome of [`MonitorController::launch_and_recover`].
#[derive(Debug)]
pub enum LaunchRequest {
    /// Launch started; the handle resolves after the follow-up probe.
    Started(JoinHandle<Result<(), LaunchError>>),
    /// A launch for this endpoint is already in flight.
    AlreadyInFlight,
}

/// Saved settings and the edit buffer, kept under one lock so that dirtiness
/// is always computed against a consistent baseline.
struct SettingsState {
    saved: PersistedSettings,
    edits: EditBuffer,
}

/// Orchestrates settings, probing and recovery for the two local servers.
pub struct MonitorController {
    store: ConfigStore,
    prober: Prober,
    launcher: RecoveryLauncher,
    recovery_delay: Duration,
    settings: Mutex<SettingsState>,
    statuses: DashMap<EndpointKind, StatusSnapshot>,
    open: AtomicBool,
    events: broadcast::Sender<StatusEvent>,
}

impl MonitorController {
    /// Create a controller, loading the saved settings from `store`.
    pub fn new(store: ConfigStore, bridge: Arc<dyn CommandBridge>, config: &BeaconConfig) -> Self {
        let prober = Prober::new(Arc::clone(&bridge), config.probe.timeout());
        let launcher = RecoveryLauncher::new(bridge, config.recovery.clone());
        Self::with_parts(store, prober, launcher, config.recovery.delay())
    }

    /// Create a controller from pre-built components.
    pub fn with_parts(
        store: ConfigStore,
        prober: Prober,
        launcher: RecoveryLauncher,
        recovery_delay: Duration,
    ) -> Self {
        let saved = store.load();
        let edits = EditBuffer::begin(&saved);
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            store,
            prober,
            launcher,
            recovery_delay,
            settings: Mutex::new(SettingsState { saved, edits }),
            statuses: DashMap::new(),
            open: AtomicBool::new(false),
            events,
        }
    }

    fn settings(&self) -> MutexGuard<'_, SettingsState> {
        self.settings.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ------------------------------------------------------------------
    // Panel visibility
    // ------------------------------------------------------------------

    /// Open the monitor panel, probing both endpoints if it was collapsed.
    ///
    /// Returns `true` if a probe cycle ran.
    pub async fn open(&self) -> bool {
        if self.open.swap(true, Ordering::AcqRel) {
            return false;
        }
        tracing::debug!("Monitor panel opened");
        self.refresh().await;
        true
    }

    /// Collapse the monitor panel. No probing happens while collapsed
    /// unless explicitly requested.
    pub fn collapse(&self) {
        self.open.store(false, Ordering::Release);
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    // ------------------------------------------------------------------
    // Probing
    // ------------------------------------------------------------------

    /// Probe both endpoints concurrently against the saved settings.
    pub async fn refresh(&self) -> Vec<ProbeOutcome> {
        let saved = self.saved_settings();

        let probes = EndpointKind::ALL.map(|kind| {
            let descriptor = saved.descriptor(kind);
            let generation = self.begin_cycle(kind, descriptor.probe_url());
            async move {
                let outcome = self.prober.probe_endpoint(&descriptor).await;
                self.complete_cycle(kind, generation, outcome.reachable);
                outcome
            }
        });

        join_all(probes).await
    }

    /// Start a probe cycle for `kind`, returning its generation.
    fn begin_cycle(&self, kind: EndpointKind, url: String) -> u64 {
        let generation = {
            let mut entry = self.statuses.entry(kind).or_default();
            entry.generation += 1;
            entry.status = ReachabilityStatus::Checking;
            entry.url = Some(url);
            entry.generation
        };

        self.publish(kind, ReachabilityStatus::Checking, generation);
        generation
    }

    /// Record a probe result unless a newer cycle has superseded it.
    fn complete_cycle(&self, kind: EndpointKind, generation: u64, reachable: bool) {
        let status = ReachabilityStatus::from_reachable(reachable);

        let applied = match self.statuses.get_mut(&kind) {
            Some(mut entry) if entry.generation == generation => {
                let previous = entry.status;
                entry.status = status;
                entry.last_checked = Some(chrono::Utc::now());
                tracing::debug!(
                    endpoint = %kind,
                    generation,
                    old_status = ?previous,
                    new_status = ?status,
                    "Endpoint status updated"
                );
                true
            }
            Some(entry) => {
                tracing::debug!(
                    endpoint = %kind,
                    generation,
                    latest = entry.generation,
                    "Discarding superseded probe result"
                );
                false
            }
            None => false,
        };

        if applied {
            self.publish(kind, status, generation);
        }
    }

    fn publish(&self, endpoint: EndpointKind, status: ReachabilityStatus, generation: u64) {
        // Ignore error if no receivers are listening
        let _ = self.events.send(StatusEvent {
            endpoint,
            status,
            generation,
        });
    }

    /// Receive every status change from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StatusEvent> {
        self.events.subscribe()
    }

    pub fn status(&self, kind: EndpointKind) -> ReachabilityStatus {
        self.snapshot_of(kind).status
    }

    pub fn snapshot_of(&self, kind: EndpointKind) -> StatusSnapshot {
        self.statuses
            .get(&kind)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Status of both endpoints, in display order.
    pub fn snapshot(&self) -> Vec<(EndpointKind, StatusSnapshot)> {
        EndpointKind::ALL
            .iter()
            .map(|&kind| (kind, self.snapshot_of(kind)))
            .collect()
    }

    // ------------------------------------------------------------------
    // Editing
    // ------------------------------------------------------------------

    /// Change one field of the edit buffer. Never probes.
    ///
    /// Returns whether the buffer now differs from the saved settings.
    pub fn edit(&self, endpoint: EndpointKind, field: Field, value: impl Into<String>) -> bool {
        let mut state = self.settings();
        let edits = state.edits.clone().set_field(endpoint, field, value);
        let dirty = edits.is_dirty(&state.saved);
        state.edits = edits;
        dirty
    }

    /// Throw away unsaved edits.
    pub fn discard_edits(&self) {
        let mut state = self.settings();
        state.edits = EditBuffer::begin(&state.saved);
    }

    pub fn is_dirty(&self) -> bool {
        let state = self.settings();
        state.edits.is_dirty(&state.saved)
    }

    pub fn edit_buffer(&self) -> EditBuffer {
        self.settings().edits.clone()
    }

    /// Settings currently used for probing.
    pub fn saved_settings(&self) -> PersistedSettings {
        self.settings().saved.clone()
    }

    /// Commit the edit buffer and re-probe with the new settings.
    ///
    /// Returns `false` without doing anything when there is nothing to save.
    /// Persistence is best effort: if the store cannot be written, the new
    /// settings still take effect for this process.
    pub async fn save(&self) -> bool {
        let committed = {
            let mut state = self.settings();
            if !state.edits.is_dirty(&state.saved) {
                return false;
            }
            let committed = state.edits.settings().clone();
            state.saved = committed.clone();
            state.edits = EditBuffer::begin(&committed);
            committed
        };

        if self.store.save(&committed).is_err() {
            tracing::warn!("Settings applied for this session only");
        }

        self.refresh().await;
        true
    }

    // ------------------------------------------------------------------
    // Recovery
    // ------------------------------------------------------------------

    pub fn is_launching(&self, kind: EndpointKind) -> bool {
        self.launcher.is_in_flight(kind)
    }

    /// Launch the server for `kind`, then re-probe after the recovery delay.
    ///
    /// The re-probe happens whether or not the launch succeeded. A launch
    /// still pending when the delay runs out is abandoned and reported as
    /// [`LaunchError::TimedOut`]. While the launch and its re-probe are
    /// pending, further requests for the same endpoint are suppressed.
    pub fn launch_and_recover(self: &Arc<Self>, kind: EndpointKind) -> LaunchRequest {
        let Some(guard) = self.launcher.try_begin(kind) else {
            tracing::debug!(endpoint = %kind, "Launch already in flight, ignoring request");
            return LaunchRequest::AlreadyInFlight;
        };

        let this = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let deadline = tokio::time::Instant::now() + this.recovery_delay;
            let result =
                match tokio::time::timeout_at(deadline, this.launcher.launch(guard.kind())).await {
                    Ok(result) => result,
                    Err(_) => {
                        tracing::warn!(endpoint = %kind, "Launch did not finish before re-check");
                        Err(LaunchError::TimedOut {
                            kind,
                            after_ms: this.recovery_delay.as_millis() as u64,
                        })
                    }
                };

            tokio::time::sleep_until(deadline).await;
            let outcomes = this.refresh().await;
            tracing::info!(
                endpoint = %kind,
                online = outcomes.iter().any(|o| o.kind == kind && o.reachable),
                "Post-launch check completed"
            );

            drop(guard);
            result
        });

        LaunchRequest::Started(handle)
    }
}
