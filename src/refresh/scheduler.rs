//! Refresh scheduler - re-runs an action each time its window expires.
//!
//! Every `arm` or `cancel` bumps a generation counter. A run only mutates the
//! scheduler while its own generation is current, so a timer or an in-flight
//! action belonging to a superseded arm cannot take effect.
//!
//! The action must not fail: it resolves to the next window, or `None` to stop
//! the loop. Retries and error reporting belong to the action itself. An
//! action that panics is treated as `None`.

use std::future::{self, Future};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::window::RefreshWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// No live window and no pending timer.
    Idle,
    /// Waiting for the live window to expire.
    Scheduled,
    /// The window was already expired when armed; the action runs without delay.
    Immediate,
    /// The action is in flight. The previous window stays live until it resolves.
    Refreshing,
    /// Torn down. Terminal.
    Cancelled,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Refresh scheduler has been cancelled")]
    Cancelled,
}

#[derive(Debug)]
struct Shared {
    generation: u64,
    state: SchedulerState,
    window: Option<RefreshWindow>,
    task: Option<JoinHandle<()>>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

fn pending_state(window: &RefreshWindow, now: Instant) -> SchedulerState {
    if window.is_expired(now) {
        SchedulerState::Immediate
    } else {
        SchedulerState::Scheduled
    }
}

/// Drives the "wait for expiry, refresh, wait again" loop of one consumer.
///
/// Must be armed from within a Tokio runtime. Dropping the scheduler cancels
/// it.
#[derive(Debug)]
pub struct RefreshScheduler {
    shared: Arc<Mutex<Shared>>,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                generation: 0,
                state: SchedulerState::Idle,
                window: None,
                task: None,
            })),
        }
    }

    /// Starts the loop with `window` as the live window.
    ///
    /// Supersedes any previous arm: its timer is disarmed and the result of an
    /// action still in flight is discarded.
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::Cancelled`] once [`cancel`](Self::cancel) has
    /// been called.
    pub fn arm<F, Fut>(&self, window: RefreshWindow, action: F) -> Result<(), SchedulerError>
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Option<RefreshWindow>> + Send + 'static,
    {
        let mut shared = lock(&self.shared);
        if shared.state == SchedulerState::Cancelled {
            #[cfg(feature = "tracing")]
            tracing::error!("arm called on a cancelled refresh scheduler");
            return Err(SchedulerError::Cancelled);
        }

        if let Some(task) = shared.task.take() {
            task.abort();
        }

        shared.generation += 1;
        shared.state = pending_state(&window, Instant::now());
        shared.window = Some(window);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            generation = shared.generation,
            state = ?shared.state,
            "refresh armed, due in {:?}",
            window.remaining(Instant::now())
        );

        let task = run(Arc::clone(&self.shared), shared.generation, window, action);
        shared.task = Some(tokio::spawn(task));
        Ok(())
    }

    /// Disarms the pending timer and stops the loop for good. Idempotent.
    pub fn cancel(&self) {
        let mut shared = lock(&self.shared);
        if shared.state == SchedulerState::Cancelled {
            return;
        }
        shared.generation += 1;
        shared.state = SchedulerState::Cancelled;
        shared.window = None;
        if let Some(task) = shared.task.take() {
            task.abort();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(generation = shared.generation, "refresh scheduler cancelled");
    }

    pub fn state(&self) -> SchedulerState {
        lock(&self.shared).state
    }

    /// The live window, if any.
    pub fn window(&self) -> Option<RefreshWindow> {
        lock(&self.shared).window
    }

    /// Elapsed fraction of the live window at `now`; `1.0` when none is live.
    pub fn progress(&self, now: Instant) -> f64 {
        self.window().map_or(1.0, |window| window.progress(now))
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run<F, Fut>(
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    mut window: RefreshWindow,
    mut action: F,
) where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Option<RefreshWindow>> + Send + 'static,
{
    loop {
        match window.fires_at() {
            Some(at) if at > Instant::now() => sleep_until(at).await,
            Some(_) => {}
            // Out of clock range: wait until superseded or cancelled.
            None => future::pending::<()>().await,
        }

        if !begin_refresh(&shared, generation) {
            return;
        }

        let next = invoke(&mut action).await;

        match settle(&shared, generation, next) {
            Some(next) => window = next,
            None => return,
        }
    }
}

/// Calls the action and awaits its result. A panic, whether raised by the
/// closure itself or by the future it returns, yields `None`.
async fn invoke<F, Fut>(action: &mut F) -> Option<RefreshWindow>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<RefreshWindow>> + Send + 'static,
{
    let refresh = match panic::catch_unwind(AssertUnwindSafe(action)) {
        Ok(refresh) => refresh,
        Err(_) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Refresh action panicked before returning a future");
            return None;
        }
    };

    // Run the future as its own task so a panic surfaces as a JoinError.
    match tokio::spawn(refresh).await {
        Ok(next) => next,
        Err(e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Refresh action failed: {}", e);
            #[cfg(not(feature = "tracing"))]
            let _ = e;
            None
        }
    }
}

/// Marks the run as in flight. Returns `false` if it was superseded.
fn begin_refresh(shared: &Mutex<Shared>, generation: u64) -> bool {
    let mut shared = lock(shared);
    if shared.generation != generation {
        return false;
    }
    shared.state = SchedulerState::Refreshing;
    true
}

/// Applies the action result. Returns the window to wait on next, if any.
fn settle(
    shared: &Mutex<Shared>,
    generation: u64,
    next: Option<RefreshWindow>,
) -> Option<RefreshWindow> {
    let mut shared = lock(shared);
    if shared.generation != generation {
        #[cfg(feature = "tracing")]
        tracing::debug!(generation, "discarding result of superseded refresh");
        return None;
    }

    match next {
        Some(window) => {
            shared.state = pending_state(&window, Instant::now());
            shared.window = Some(window);
            Some(window)
        }
        None => {
            #[cfg(feature = "tracing")]
            tracing::info!("refresh loop stopped, scheduler idle");
            shared.state = SchedulerState::Idle;
            shared.window = None;
            shared.task = None;
            None
        }
    }
}
