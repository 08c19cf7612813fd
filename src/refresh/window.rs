//! Validity window of the currently displayed data.

use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshWindow {
    pub started_at: Instant,
    pub duration: Duration,
}

impl RefreshWindow {
    pub fn new(started_at: Instant, duration: Duration) -> Self {
        Self { started_at, duration }
    }

    /// A window opening at the current instant.
    pub fn starting_now(duration: Duration) -> Self {
        Self::new(Instant::now(), duration)
    }

    /// Instant at which the data expires and a refresh is due.
    ///
    /// `None` when the window reaches past what the clock can represent; such
    /// a window never expires.
    pub fn fires_at(&self) -> Option<Instant> {
        self.started_at.checked_add(self.duration)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.fires_at()
            .map_or(Duration::MAX, |at| at.saturating_duration_since(now))
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.fires_at().is_some_and(|at| at <= now)
    }

    /// Elapsed fraction of the window, clamped to `[0, 1]`.
    ///
    /// An empty window is always complete.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }
}
