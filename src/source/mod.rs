//! Change detection strategies for the watched file.
//!
//! Two interchangeable sources feed the same handler: [`HashPoller`] polls a
//! content fingerprint on a fixed interval, [`EventWatcher`] subscribes to
//! OS filesystem notifications. Both invoke the handler synchronously, so
//! actions are strictly serialized with detection.

pub mod poller;
pub mod watcher;

pub use poller::HashPoller;
pub use watcher::EventWatcher;

use async_trait::async_trait;

/// Receiver of change signals from a detection strategy.
///
/// Called once per detected change; the detection loop does not proceed to
/// the next cycle or event until the call returns.
#[async_trait]
pub trait ChangeHandler: Send {
    /// React to a detected change of the watched file.
    async fn on_change(&mut self);
}
