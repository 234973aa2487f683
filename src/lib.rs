//! # svcwatch
//!
//! Watches a single configuration file and restarts a named systemd service
//! whenever the file's content changes.
//!
//! ## Overview
//!
//! Two interchangeable detection strategies feed one throttled actuator:
//!
//! - [`source::HashPoller`] reads the file on a fixed interval and fires
//!   when its content fingerprint differs from the previous tick.
//! - [`source::EventWatcher`] subscribes to OS filesystem notifications and
//!   fires on every delivered event.
//!
//! Either way, each detected change goes through the
//! [`restart::ThrottledActuator`], which enforces a minimum spacing between
//! restart attempts and never lets a failed `systemctl restart` take the
//! watch loop down.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use svcwatch::prelude::*;
//! use std::time::Duration;
//!
//! # async fn example() -> svcwatch::error::Result<()> {
//! let restarter = SystemctlRestarter::new("app.service");
//! let mut actuator = ThrottledActuator::new(restarter, Duration::from_secs(1));
//!
//! // One initial restart to establish the desired state, then watch.
//! actuator.trigger().await;
//! HashPoller::new("/etc/app/app.conf", Duration::from_secs(2))
//!     .run(&mut actuator)
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod fingerprint;
pub mod restart;
pub mod source;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::config::{Config, Strategy};
    pub use crate::error::{Result, WatchError};
    pub use crate::fingerprint::Fingerprint;
    pub use crate::restart::{Restarter, SystemctlRestarter, ThrottledActuator};
    pub use crate::source::{ChangeHandler, EventWatcher, HashPoller};
}
