//! Notification-based change detection.

use crate::error::{Result, WatchError};
use crate::source::ChangeHandler;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Subscribes to OS filesystem notifications for a single path.
///
/// Every delivered event fires the handler, regardless of event kind and
/// without any content comparison, so this strategy reacts with lower
/// latency than [`HashPoller`](crate::source::HashPoller) but also fires on
/// no-op writes and metadata-only changes. The throttle downstream absorbs
/// the extra false positives.
///
/// Errors reported by the notification subsystem while the subscription is
/// live are logged and the loop keeps running; only subscription setup
/// failure is fatal.
pub struct EventWatcher {
    // Dropping the watcher cancels the subscription, so it lives here for
    // the lifetime of the loop.
    _watcher: RecommendedWatcher,
    path: PathBuf,
    events: mpsc::UnboundedReceiver<Event>,
}

impl EventWatcher {
    /// Register interest in `path` with the OS notification facility.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Watch`] if the path cannot be resolved or the
    /// subscription cannot be established (path missing, permission denied).
    pub fn subscribe(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = path
            .canonicalize()
            .map_err(|e| WatchError::watch(path, notify::Error::io(e)))?;

        let (event_tx, events) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            match res {
                // Receiver dropped means the drain loop is gone; nothing to do.
                Ok(event) => {
                    let _ = event_tx.send(event);
                }
                // Subsystem errors are often transient; keep the subscription.
                Err(err) => warn!(%err, "filesystem notification error"),
            }
        })
        .map_err(|e| WatchError::watch(&canonical, e))?;

        watcher
            .watch(&canonical, RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::watch(&canonical, e))?;

        Ok(Self {
            _watcher: watcher,
            path: canonical,
            events,
        })
    }

    /// Drain notification events forever, invoking `handler` once per event.
    ///
    /// Events are handled strictly one at a time; a slow handler delays
    /// subsequent events but never reorders or drops them.
    pub async fn run<H: ChangeHandler>(mut self, handler: &mut H) -> Result<()> {
        info!(path = %self.path.display(), "watching for filesystem events");
        while let Some(event) = self.events.recv().await {
            debug!(kind = ?event.kind, "filesystem event");
            handler.on_change().await;
        }
        // The sender lives inside the notify callback, so the channel only
        // closes if the notification backend itself shuts down.
        Ok(())
    }
}
