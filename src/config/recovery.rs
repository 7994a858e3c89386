//! Recovery (launch + re-probe) configuration

use crate::endpoint::EndpointKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// External command that starts a local server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchCommand {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl LaunchCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Recovery configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Delay between a launch and the follow-up probe
    pub delay_ms: u64,
    /// Command that starts the inference server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inference: Option<LaunchCommand>,
    /// Command that starts the transcription server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcription: Option<LaunchCommand>,
}

impl RecoveryConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn command_for(&self, kind: EndpointKind) -> Option<&LaunchCommand> {
        match kind {
            EndpointKind::Inference => self.inference.as_ref(),
            EndpointKind::Transcription => self.transcription.as_ref(),
        }
    }
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            delay_ms: 3000,
            // LM Studio's bundled CLI
            inference: Some(LaunchCommand::new("lms", &["server", "start"])),
            transcription: None,
        }
    }
}
