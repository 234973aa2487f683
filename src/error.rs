//! Error types for svcwatch.

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;

/// Result type alias for svcwatch operations.
pub type Result<T> = std::result::Result<T, WatchError>;

/// Errors that can occur while watching a file or restarting the service.
///
/// Fallible operations go through the `#[track_caller]` constructors below so
/// every error renders the file and line of the call site that produced it.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Command-line configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Failed to read the watched file. Fatal for the poll strategy.
    #[error("Failed to read {}: {source} (at {location})", path.display())]
    Read {
        /// The watched path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Call site that observed the failure.
        location: &'static Location<'static>,
    },

    /// Failed to subscribe to filesystem notifications for the watched path.
    #[error("Failed to watch {}: {source} (at {location})", path.display())]
    Watch {
        /// The watched path.
        path: PathBuf,
        /// Underlying notify error.
        source: notify::Error,
        /// Call site that observed the failure.
        location: &'static Location<'static>,
    },

    /// The restart command could not be spawned at all.
    #[error("Failed to run restart command for '{service}': {source} (at {location})")]
    RestartSpawn {
        /// The service unit being restarted.
        service: String,
        /// Underlying I/O error.
        source: std::io::Error,
        /// Call site that observed the failure.
        location: &'static Location<'static>,
    },

    /// The restart command ran but exited non-zero. Carries the combined
    /// stdout/stderr of the command; output is only surfaced on failure.
    #[error("Restart of '{service}' exited with {status}: {output} (at {location})")]
    RestartFailed {
        /// The service unit being restarted.
        service: String,
        /// Exit status reported by the service manager.
        status: ExitStatus,
        /// Combined stdout and stderr of the command.
        output: String,
        /// Call site that observed the failure.
        location: &'static Location<'static>,
    },

    /// The restart command did not complete within the configured timeout.
    #[error("Restart of '{service}' did not complete within {timeout:?} (at {location})")]
    RestartTimeout {
        /// The service unit being restarted.
        service: String,
        /// The configured bound.
        timeout: Duration,
        /// Call site that observed the failure.
        location: &'static Location<'static>,
    },
}

impl WatchError {
    /// Wrap a file read failure with the caller's location.
    #[track_caller]
    pub fn read(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.as_ref().to_path_buf(),
            source,
            location: Location::caller(),
        }
    }

    /// Wrap a notify subscription failure with the caller's location.
    #[track_caller]
    pub fn watch(path: impl AsRef<Path>, source: notify::Error) -> Self {
        Self::Watch {
            path: path.as_ref().to_path_buf(),
            source,
            location: Location::caller(),
        }
    }

    /// Wrap a failure to spawn the restart command.
    #[track_caller]
    pub fn restart_spawn(service: impl Into<String>, source: std::io::Error) -> Self {
        Self::RestartSpawn {
            service: service.into(),
            source,
            location: Location::caller(),
        }
    }

    /// Record a non-zero exit from the restart command.
    #[track_caller]
    pub fn restart_failed(
        service: impl Into<String>,
        status: ExitStatus,
        output: impl Into<String>,
    ) -> Self {
        Self::RestartFailed {
            service: service.into(),
            status,
            output: output.into(),
            location: Location::caller(),
        }
    }

    /// Record a restart command timeout.
    #[track_caller]
    pub fn restart_timeout(service: impl Into<String>, timeout: Duration) -> Self {
        Self::RestartTimeout {
            service: service.into(),
            timeout,
            location: Location::caller(),
        }
    }
}
