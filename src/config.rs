//! Command-line configuration.

use crate::error::{Result, WatchError};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Watch a configuration file and restart a systemd service when it changes.
#[derive(Debug, Parser)]
#[command(name = "svcwatch", version, about)]
pub struct Config {
    /// The systemd service to restart.
    #[arg(long)]
    pub service: String,

    /// Path to the config file to watch.
    #[arg(long)]
    pub config_path: PathBuf,

    /// Change detection strategy.
    #[arg(long, value_enum, default_value_t = Strategy::Poll)]
    pub strategy: Strategy,

    /// Poll interval (poll strategy only). Ex: 2s, 500ms.
    #[arg(long, default_value = "2s", value_parser = humantime::parse_duration)]
    pub poll_interval: Duration,

    /// Minimum time between two restart attempts.
    #[arg(long, default_value = "1s", value_parser = humantime::parse_duration)]
    pub throttle: Duration,

    /// Ex: trace, debug, info, warn, error.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Optional bound on how long a single restart command may run.
    /// Unbounded when omitted.
    #[arg(long, value_parser = humantime::parse_duration)]
    pub restart_timeout: Option<Duration>,
}

/// How changes to the watched file are detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Poll a content fingerprint on a fixed interval.
    Poll,
    /// Subscribe to OS filesystem notifications.
    Notify,
}

impl Config {
    /// Validate the parsed flags before the daemon starts.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::InvalidConfig`] for an empty service name or
    /// watch path, or an unrecognized log level.
    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            return Err(WatchError::InvalidConfig(
                "service must not be empty".to_string(),
            ));
        }
        if self.config_path.as_os_str().is_empty() {
            return Err(WatchError::InvalidConfig(
                "config-path must not be empty".to_string(),
            ));
        }
        self.level()?;
        Ok(())
    }

    /// Parse the configured log level (case-insensitive).
    pub fn level(&self) -> Result<tracing::Level> {
        self.log_level.parse().map_err(|_| {
            WatchError::InvalidConfig(format!("unknown log level '{}'", self.log_level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("svcwatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_are_poll_2s_throttle_1s_info() {
        let cfg = parse(&["--service", "app.service", "--config-path", "/etc/app.conf"]);
        assert_eq!(cfg.strategy, Strategy::Poll);
        assert_eq!(cfg.poll_interval, Duration::from_secs(2));
        assert_eq!(cfg.throttle, Duration::from_secs(1));
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.restart_timeout.is_none());
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn durations_parse_humantime_strings() {
        let cfg = parse(&[
            "--service",
            "app.service",
            "--config-path",
            "/etc/app.conf",
            "--poll-interval",
            "500ms",
            "--restart-timeout",
            "30s",
        ]);
        assert_eq!(cfg.poll_interval, Duration::from_millis(500));
        assert_eq!(cfg.restart_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn empty_service_is_rejected() {
        let cfg = parse(&["--service", "", "--config-path", "/etc/app.conf"]);
        assert!(matches!(
            cfg.validate(),
            Err(WatchError::InvalidConfig(_))
        ));
    }

    #[test]
    fn log_level_is_case_insensitive() {
        let cfg = parse(&[
            "--service",
            "app.service",
            "--config-path",
            "/etc/app.conf",
            "--log-level",
            "DEBUG",
        ]);
        assert_eq!(cfg.level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let cfg = parse(&[
            "--service",
            "app.service",
            "--config-path",
            "/etc/app.conf",
            "--log-level",
            "loud",
        ]);
        assert!(cfg.validate().is_err());
    }
}
