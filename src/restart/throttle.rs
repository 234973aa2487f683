//! Throttle policy between change signals and restart attempts.

use crate::restart::Restarter;
use crate::source::ChangeHandler;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Throttle bookkeeping: when the last attempt was made and how far apart
/// attempts must be.
struct ThrottleState {
    /// `None` until the first attempt, so a fresh process is never throttled.
    last_restart: Option<Instant>,
    threshold: Duration,
}

/// Rate-limits restart attempts and invokes the [`Restarter`].
///
/// [`trigger`](Self::trigger) is called once per detected change. Inside the
/// throttle window the call is a logged no-op and the state is untouched.
/// Outside the window the restarter is invoked; its outcome is logged, never
/// propagated, and the window restarts from the attempt time whether or not
/// the restart succeeded. A failing restart command is therefore retried no
/// faster than the threshold allows.
pub struct ThrottledActuator<R: Restarter> {
    state: ThrottleState,
    restarter: R,
}

impl<R: Restarter> ThrottledActuator<R> {
    /// Create an actuator that enforces `threshold` between attempts.
    pub fn new(restarter: R, threshold: Duration) -> Self {
        Self {
            state: ThrottleState {
                last_restart: None,
                threshold,
            },
            restarter,
        }
    }

    /// Apply the throttle policy and, when it allows, attempt a restart.
    pub async fn trigger(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.state.last_restart {
            let since = now.duration_since(last);
            debug!(?since, "time since last restart");
            if since < self.state.threshold {
                info!("throttling restart");
                return;
            }
        }

        if let Err(err) = self.restarter.restart().await {
            error!(%err, "restart failed");
        }
        // Unconditional once an attempt was made, success or failure.
        self.state.last_restart = Some(now);
    }
}

#[async_trait]
impl<R: Restarter> ChangeHandler for ThrottledActuator<R> {
    async fn on_change(&mut self) {
        self.trigger().await;
    }
}
