//! Progress bar timing for the refresh indicator.
//!
//! The bar animates over a fixed visual cycle, whatever the real window
//! length. Only the remaining time is mapped onto it, so a 90 s window shows
//! an empty bar until the last 30 s.

use std::time::Duration;
use tokio::time::Instant;

use super::window::RefreshWindow;
use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressBar {
    cycle: Duration,
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new(config::DEFAULT_PROGRESS_CYCLE)
    }
}

impl ProgressBar {
    pub fn new(cycle: Duration) -> Self {
        Self { cycle }
    }

    /// Cycle length taken from `SECONDLOCK_PROGRESS_CYCLE_MS`.
    pub fn from_env() -> Self {
        Self::new(config::progress_cycle_or_default())
    }

    pub fn cycle(&self) -> Duration {
        self.cycle
    }

    /// Position of the animation within its cycle at `now`.
    pub fn animation_offset(&self, window: &RefreshWindow, now: Instant) -> Duration {
        self.cycle.saturating_sub(window.remaining(now))
    }

    /// Filled fraction of the bar, in `[0, 1]`.
    pub fn visual_ratio(&self, window: &RefreshWindow, now: Instant) -> f64 {
        if self.cycle.is_zero() {
            return 1.0;
        }
        let offset = self.animation_offset(window, now);
        (offset.as_secs_f64() / self.cycle.as_secs_f64()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_short_window_starts_partially_filled() {
        let bar = ProgressBar::default();
        let window = RefreshWindow::starting_now(Duration::from_secs(20));
        let now = Instant::now();

        assert_eq!(bar.animation_offset(&window, now), Duration::from_secs(10));
        assert!((bar.visual_ratio(&window, now) - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(bar.visual_ratio(&window, now + Duration::from_secs(20)), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_window_is_capped() {
        let bar = ProgressBar::new(Duration::from_secs(30));
        let window = RefreshWindow::starting_now(Duration::from_secs(90));
        let now = Instant::now();

        assert_eq!(bar.visual_ratio(&window, now), 0.0);
        assert_eq!(bar.visual_ratio(&window, now + Duration::from_secs(60)), 0.0);
        assert_eq!(bar.visual_ratio(&window, now + Duration::from_secs(75)), 0.5);
        assert_eq!(bar.visual_ratio(&window, now + Duration::from_secs(120)), 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_cycle_is_full() {
        let bar = ProgressBar::new(Duration::ZERO);
        let window = RefreshWindow::starting_now(Duration::from_secs(5));
        assert_eq!(bar.visual_ratio(&window, Instant::now()), 1.0);
    }
}
