//! Process/command bridge.
//!
//! The monitor never talks to the network or spawns processes itself. It goes
//! through a [`CommandBridge`], which a UI shell may back with a privileged
//! helper process. [`SystemBridge`] is the in-process implementation.

mod error;

pub use error::*;

use crate::config::LaunchCommand;
use crate::endpoint::EndpointKind;
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;

/// How long a freshly spawned launcher is watched for an immediate failure.
const LAUNCH_SETTLE: Duration = Duration::from_millis(250);

/// Privileged operations the monitor delegates.
#[async_trait]
pub trait CommandBridge: Send + Sync {
    /// Whether `url` answers with a success status.
    async fn check_server_status(&self, url: &str) -> Result<bool, BridgeError>;

    /// Start the local server for `kind` using `command`.
    ///
    /// Returns shortly after the process has been spawned; it does not wait
    /// for the server to become ready.
    async fn launch_local_server(
        &self,
        kind: EndpointKind,
        command: &LaunchCommand,
    ) -> Result<(), BridgeError>;
}

/// Bridge performing HTTP checks with `reqwest` and launching with
/// `tokio::process`.
pub struct SystemBridge {
    client: reqwest::Client,
    timeout: Duration,
}

impl SystemBridge {
    /// Create a bridge whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BridgeError::Request(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    fn classify_error(e: reqwest::Error, timeout: Duration) -> BridgeError {
        if e.is_timeout() {
            BridgeError::Timeout(timeout.as_secs())
        } else if e.is_builder() {
            BridgeError::InvalidUrl(e.to_string())
        } else if e.is_connect() {
            BridgeError::ConnectionFailed(e.to_string())
        } else {
            BridgeError::Request(e.to_string())
        }
    }
}

#[async_trait]
impl CommandBridge for SystemBridge {
    async fn check_server_status(&self, url: &str) -> Result<bool, BridgeError> {
        match self.client.get(url).timeout(self.timeout).send().await {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => Err(Self::classify_error(e, self.timeout)),
        }
    }

    async fn launch_local_server(
        &self,
        kind: EndpointKind,
        command: &LaunchCommand,
    ) -> Result<(), BridgeError> {
        let mut child = tokio::process::Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| BridgeError::Launch {
                program: command.program.clone(),
                source,
            })?;

        tracing::info!(
            endpoint = %kind,
            command = %command,
            pid = ?child.id(),
            "Spawned local server launcher"
        );

        // A launcher that fails at once (bad arguments, missing runtime) is a
        // failed launch; one that exits cleanly or keeps running is not.
        if let Ok(waited) = tokio::time::timeout(LAUNCH_SETTLE, child.wait()).await {
            return match waited {
                Ok(status) if status.success() => {
                    tracing::debug!(endpoint = %kind, %status, "Launcher exited");
                    Ok(())
                }
                Ok(status) => Err(BridgeError::LaunchExited {
                    program: command.program.clone(),
                    status: status.to_string(),
                }),
                Err(source) => Err(BridgeError::Launch {
                    program: command.program.clone(),
                    source,
                }),
            };
        }

        // Reap the launcher so it does not linger as a zombie.
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::debug!(endpoint = %kind, %status, "Launcher exited"),
                Err(e) => tracing::debug!(endpoint = %kind, error = %e, "Launcher wait failed"),
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn bridge() -> SystemBridge {
        SystemBridge::new(Duration::from_secs(2)).unwrap()
    }

    #[tokio::test]
    async fn test_check_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{"id": "qwen2.5-7b-instruct"}]
            })))
            .mount(&server)
            .await;

        let url = format!("{}/v1/models", server.uri());
        assert!(bridge().check_server_status(&url).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_error_status_is_false() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let url = format!("{}/", server.uri());
        assert!(!bridge().check_server_status(&url).await.unwrap());
    }

    #[tokio::test]
    async fn test_check_refused_connection_is_error() {
        // Port 9 (discard) is essentially never listening on loopback.
        let result = bridge().check_server_status("http://127.0.0.1:9/").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_check_malformed_url_is_error() {
        let result = bridge().check_server_status("http://exa mple:abc/v1/models").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_check_timeout_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
            .mount(&server)
            .await;

        let bridge = SystemBridge::new(Duration::from_millis(200)).unwrap();
        let result = bridge.check_server_status(&server.uri()).await;
        assert!(matches!(result, Err(BridgeError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_launch_missing_program_is_error() {
        let command = LaunchCommand::new("beacon-test-no-such-program", &[]);
        let result = bridge()
            .launch_local_server(EndpointKind::Inference, &command)
            .await;
        assert!(matches!(result, Err(BridgeError::Launch { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_failing_at_once_is_error() {
        let command = LaunchCommand::new("sh", &["-c", "exit 3"]);
        let result = bridge()
            .launch_local_server(EndpointKind::Inference, &command)
            .await;
        match result {
            Err(BridgeError::LaunchExited { program, .. }) => assert_eq!(program, "sh"),
            other => panic!("expected LaunchExited, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_quick_success_and_long_running_are_ok() {
        for script in ["exit 0", "sleep 2"] {
            let command = LaunchCommand::new("sh", &["-c", script]);
            let result = bridge()
                .launch_local_server(EndpointKind::Inference, &command)
                .await;
            assert!(result.is_ok(), "{script}: {result:?}");
        }
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            BridgeError::Timeout(5).to_string(),
            "request timeout after 5s"
        );
        assert_eq!(
            BridgeError::ConnectionFailed("refused".to_string()).to_string(),
            "connection failed: refused"
        );
    }
}
