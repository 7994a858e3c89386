//! Settings command implementation

use crate::cli::output::{format_settings_json, format_settings_table, SettingsView};
use crate::cli::status::render_status;
use crate::cli::{SettingsSetArgs, SettingsShowArgs};
use crate::monitor::MonitorController;
use crate::session::Field;

/// Handle `beacon settings show`
pub fn handle_settings_show(
    args: &SettingsShowArgs,
    monitor: &MonitorController,
) -> Result<String, Box<dyn std::error::Error>> {
    let views = SettingsView::all(&monitor.saved_settings());
    if args.json {
        Ok(format_settings_json(&views)?)
    } else {
        Ok(format_settings_table(&views))
    }
}

/// Handle `beacon settings set`
///
/// Stages the given fields, saves them and shows the status from the
/// re-check that follows the save.
pub async fn handle_settings_set(
    args: &SettingsSetArgs,
    monitor: &MonitorController,
) -> Result<String, Box<dyn std::error::Error>> {
    if args.host.is_none() && args.port.is_none() {
        return Err("Nothing to change. Pass --host and/or --port.".into());
    }

    if let Some(host) = &args.host {
        monitor.edit(args.endpoint, Field::Host, host.clone());
    }
    if let Some(port) = &args.port {
        monitor.edit(args.endpoint, Field::Port, port.clone());
    }

    if !monitor.save().await {
        return Ok(format!(
            "No changes to {} settings.",
            args.endpoint.display_name()
        ));
    }

    let descriptor = monitor.saved_settings().descriptor(args.endpoint);
    let status = render_status(monitor, false)?;
    Ok(format!(
        "✓ {} now at {}\n{}",
        args.endpoint.display_name(),
        descriptor.base_url(),
        status
    ))
}
