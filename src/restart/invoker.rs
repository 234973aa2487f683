//! Restart invocation against the system service manager.

use crate::error::{Result, WatchError};
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::info;

/// Performs the actual restart of the target service.
///
/// A trait so the throttle layer can be exercised against a fake in tests;
/// the real implementation is [`SystemctlRestarter`].
#[async_trait]
pub trait Restarter: Send + Sync {
    /// Restart the target service once.
    ///
    /// # Errors
    ///
    /// Returns an error describing the failed attempt; callers log it and
    /// carry on, a failed restart never terminates the watch loop.
    async fn restart(&self) -> Result<()>;
}

/// Restarts a service unit by shelling out to `systemctl restart <unit>`.
///
/// The call captures combined stdout/stderr; output is only surfaced when
/// the command fails. Without a timeout the call blocks until the service
/// manager returns, however long that takes — set one via [`with_timeout`]
/// to bound it.
///
/// [`with_timeout`]: SystemctlRestarter::with_timeout
pub struct SystemctlRestarter {
    service: String,
    program: String,
    timeout: Option<Duration>,
}

impl SystemctlRestarter {
    /// Create a restarter for the given service unit.
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            program: "systemctl".to_string(),
            timeout: None,
        }
    }

    /// Bound how long the restart command may run. `None` (the default)
    /// means unbounded.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[cfg(test)]
    fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl Restarter for SystemctlRestarter {
    async fn restart(&self) -> Result<()> {
        info!(service = %self.service, "restarting service");

        let mut cmd = Command::new(&self.program);
        cmd.arg("restart").arg(&self.service);

        let awaited = match self.timeout {
            Some(bound) => {
                // Otherwise the service-manager process would outlive the
                // timed-out attempt.
                cmd.kill_on_drop(true);
                match tokio::time::timeout(bound, cmd.output()).await {
                    Ok(result) => result,
                    Err(_) => return Err(WatchError::restart_timeout(&self.service, bound)),
                }
            }
            None => cmd.output().await,
        };
        let output = awaited.map_err(|e| WatchError::restart_spawn(&self.service, e))?;

        if output.status.success() {
            return Ok(());
        }

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        Err(WatchError::restart_failed(
            &self.service,
            output.status,
            combined.trim().to_string(),
        ))
    }
}
