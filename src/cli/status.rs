//! Status command implementation

use crate::cli::output::{format_status_json, format_status_table, StatusView};
use crate::cli::StatusArgs;
use crate::monitor::MonitorController;

/// Current status of both servers, rendered as views.
pub fn status_views(monitor: &MonitorController) -> Vec<StatusView> {
    let settings = monitor.saved_settings();
    monitor
        .snapshot()
        .iter()
        .map(|(kind, snapshot)| StatusView::new(*kind, &settings, snapshot))
        .collect()
}

/// Render the current status of both servers.
pub fn render_status(
    monitor: &MonitorController,
    json: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let views = status_views(monitor);
    if json {
        Ok(format_status_json(&views)?)
    } else {
        Ok(format_status_table(&views))
    }
}

/// Handle status command
///
/// Opens the monitor, which probes both servers once.
pub async fn handle_status(
    args: &StatusArgs,
    monitor: &MonitorController,
) -> Result<String, Box<dyn std::error::Error>> {
    monitor.open().await;
    render_status(monitor, args.json)
}
