//! Error types for bridge operations.

use thiserror::Error;

/// Errors reported by a [`super::CommandBridge`].
///
/// The monitor collapses all of these into "offline" or "launch failed";
/// the variants exist for logging.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Request timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Connection refused, reset, or unresolvable host
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// URL could not be turned into a request
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure
    #[error("request failed: {0}")]
    Request(String),

    /// Launch command could not be started
    #[error("failed to start '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Launch command started but failed straight away
    #[error("'{program}' exited right after start with {status}")]
    LaunchExited { program: String, status: String },
}
