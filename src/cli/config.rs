//! Config command handlers

use crate::cli::ConfigInitArgs;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../beacon.example.toml");

/// Handle `beacon config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<String, Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&args.output, EXAMPLE_CONFIG)?;
    tracing::info!(path = %args.output.display(), "Wrote example configuration");

    Ok(format!(
        "✓ Configuration file created: {}\n  \
         Edit it to change probe timeouts and launch commands.",
        args.output.display()
    ))
}
