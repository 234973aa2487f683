//! Polling change detection based on content fingerprints.

use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::source::ChangeHandler;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info};

/// Polls the watched file on a fixed interval and fires on content change.
///
/// Each tick reads the whole file, fingerprints it, and compares against the
/// previous tick. The first successful tick always fires (the previous
/// fingerprint starts out as a sentinel), so a fresh loop performs one
/// initial action before settling.
///
/// Unlike [`EventWatcher`](crate::source::EventWatcher), a read failure here
/// is fatal: the loop stops and the error is returned to the caller. The
/// watched file being unreadable at poll time is not a transient condition
/// worth retrying.
pub struct HashPoller {
    path: PathBuf,
    interval: Duration,
}

impl HashPoller {
    /// Create a poller for `path` ticking every `interval`.
    pub fn new(path: impl AsRef<Path>, interval: Duration) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            interval,
        }
    }

    /// Run the poll loop forever, invoking `handler` once per content change.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::Read`](crate::error::WatchError::Read) as soon
    /// as the file cannot be read; no further polling occurs after that.
    pub async fn run<H: ChangeHandler>(self, handler: &mut H) -> Result<()> {
        info!(path = %self.path.display(), interval = ?self.interval, "polling for content changes");
        let mut previous: Option<Fingerprint> = None;
        loop {
            let current = Fingerprint::of_file(&self.path)?;
            if previous != Some(current) {
                debug!(fingerprint = %current, "content changed");
                handler.on_change().await;
            }
            previous = Some(current);
            // Unconditional, whether or not a change fired this cycle.
            sleep(self.interval).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WatchError;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl ChangeHandler for Counting {
        async fn on_change(&mut self) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_fires_once_then_settles() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.conf");
        fs::write(&path, "port: 8080").unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let mut handler = Counting(Arc::clone(&fired));
        let poller = HashPoller::new(&path, Duration::from_secs(2));

        let task = tokio::spawn(async move { poller.run(&mut handler).await });
        tokio::time::sleep(Duration::from_secs(10)).await;
        task.abort();

        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn changed_content_fires_again() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.conf");
        fs::write(&path, "port: 8080").unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let mut handler = Counting(Arc::clone(&fired));
        let poller = HashPoller::new(&path, Duration::from_secs(2));

        let task = tokio::spawn(async move { poller.run(&mut handler).await });
        tokio::time::sleep(Duration::from_secs(5)).await;
        fs::write(&path, "port: 9090").unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;
        task.abort();

        assert_eq!(fired.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn read_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.conf");
        fs::write(&path, "port: 8080").unwrap();

        let fired = Arc::new(AtomicUsize::new(0));
        let mut handler = Counting(Arc::clone(&fired));
        let poller = HashPoller::new(&path, Duration::from_secs(2));

        let task = tokio::spawn(async move { poller.run(&mut handler).await });
        tokio::time::sleep(Duration::from_secs(1)).await;
        fs::remove_file(&path).unwrap();

        let result = task.await.unwrap();
        assert!(matches!(result, Err(WatchError::Read { .. })));
    }
}
