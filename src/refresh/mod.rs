//! Periodic refresh of server-provided data
//!
//! The server tells the client how long the codes it returned stay valid.
//! [`RefreshScheduler`] waits out that [`RefreshWindow`], runs the refresh
//! action, and re-arms itself with the window the action returns.

mod progress;
mod scheduler;
mod window;

pub use progress::ProgressBar;
pub use scheduler::{RefreshScheduler, SchedulerError, SchedulerState};
pub use window::RefreshWindow;
