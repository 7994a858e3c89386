//! Launch command implementation

use crate::cli::status::render_status;
use crate::cli::LaunchArgs;
use crate::monitor::{LaunchRequest, MonitorController, ReachabilityStatus};
use std::sync::Arc;

/// Handle `beacon launch`
///
/// Checks the server first and skips the launch if it already answers,
/// unless `--force` is given. After launching, waits for the follow-up
/// check and reports the resulting status.
pub async fn handle_launch(
    args: &LaunchArgs,
    monitor: &Arc<MonitorController>,
) -> Result<String, Box<dyn std::error::Error>> {
    let name = args.endpoint.display_name();

    if !args.force {
        monitor.refresh().await;
        if monitor.status(args.endpoint) == ReachabilityStatus::Online {
            return Ok(format!("{} is already running.", name));
        }
    }

    let handle = match monitor.launch_and_recover(args.endpoint) {
        LaunchRequest::Started(handle) => handle,
        LaunchRequest::AlreadyInFlight => {
            return Ok(format!("A launch of {} is already in progress.", name));
        }
    };

    let launch_result = handle.await?;
    let status = render_status(monitor, false)?;

    match launch_result {
        Ok(()) => {
            let outcome = match monitor.status(args.endpoint) {
                ReachabilityStatus::Online => format!("✓ {} is up.", name),
                _ => format!("{} was started but is not answering yet.", name),
            };
            Ok(format!("{}\n{}", outcome, status))
        }
        Err(e) => Err(format!("Failed to launch {}: {}\n{}", name, e, status).into()),
    }
}
