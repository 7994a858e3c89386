//! Output formatting helpers for CLI commands

use crate::endpoint::EndpointKind;
use crate::monitor::{ReachabilityStatus, StatusSnapshot};
use crate::settings::PersistedSettings;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

/// View model for endpoint status display
#[derive(Debug, Clone, serde::Serialize)]
pub struct StatusView {
    pub endpoint: EndpointKind,
    pub name: String,
    pub url: String,
    pub status: ReachabilityStatus,
    pub last_checked: Option<String>,
}

impl StatusView {
    pub fn new(
        kind: EndpointKind,
        settings: &PersistedSettings,
        snapshot: &StatusSnapshot,
    ) -> Self {
        Self {
            endpoint: kind,
            name: kind.display_name().to_string(),
            url: snapshot
                .url
                .clone()
                .unwrap_or_else(|| settings.descriptor(kind).probe_url()),
            status: snapshot.status,
            last_checked: snapshot.last_checked.map(|t| t.to_rfc3339()),
        }
    }
}

/// View model for saved settings display
#[derive(Debug, Clone, serde::Serialize)]
pub struct SettingsView {
    pub endpoint: EndpointKind,
    pub name: String,
    pub host: String,
    pub port: String,
    pub base_url: String,
}

impl SettingsView {
    pub fn all(settings: &PersistedSettings) -> Vec<Self> {
        EndpointKind::ALL
            .iter()
            .map(|&kind| {
                let descriptor = settings.descriptor(kind);
                Self {
                    endpoint: kind,
                    name: kind.display_name().to_string(),
                    base_url: descriptor.base_url(),
                    host: descriptor.host,
                    port: descriptor.port,
                }
            })
            .collect()
    }
}

fn status_label(status: ReachabilityStatus) -> String {
    match status {
        ReachabilityStatus::Online => "Online".green().to_string(),
        ReachabilityStatus::Offline => "Offline".red().to_string(),
        ReachabilityStatus::Checking => "Checking".yellow().to_string(),
    }
}

/// Hint shown next to an endpoint that is not answering.
pub fn offline_hint(kind: EndpointKind) -> &'static str {
    match kind {
        EndpointKind::Inference => "not running (try `beacon launch lmstudio`)",
        EndpointKind::Transcription => "not running (start manually)",
    }
}

/// Format statuses as a table
pub fn format_status_table(views: &[StatusView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Server", "URL", "Status", "Note"]);

    for v in views {
        let note = match v.status {
            ReachabilityStatus::Online => "connected",
            ReachabilityStatus::Offline => offline_hint(v.endpoint),
            ReachabilityStatus::Checking => "",
        };
        table.add_row(vec![
            Cell::new(&v.name),
            Cell::new(&v.url),
            Cell::new(status_label(v.status)),
            Cell::new(note),
        ]);
    }

    table.to_string()
}

/// Format statuses as JSON
pub fn format_status_json(views: &[StatusView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "servers": views }))
}

/// Format saved settings as a table
pub fn format_settings_table(views: &[SettingsView]) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Server", "Host", "Port", "Base URL"]);

    for v in views {
        table.add_row(vec![
            Cell::new(&v.name),
            Cell::new(&v.host),
            Cell::new(&v.port),
            Cell::new(&v.base_url),
        ]);
    }

    table.to_string()
}

/// Format saved settings as JSON
pub fn format_settings_json(views: &[SettingsView]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "servers": views }))
}
