//! Client core for the SecondLock two-factor secret manager
//!
//! This library provides the logic behind the SecondLock client views:
//! password strength rules for the registration and password forms, and the
//! scheduler that refreshes TOTP codes when the server says they expire.
//!
//! # Features
//!
//! - `async` (default): Enables the refresh scheduler, session events and
//!   debounced password evaluation
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `SECONDLOCK_PROGRESS_CYCLE_MS`: Visual cycle of the refresh progress bar
//!   (default: `30000`)
//!
//! # Example
//!
//! ```rust
//! use secondlock::{evaluate, is_strong, PasswordStrength};
//! use secrecy::SecretString;
//!
//! let password = SecretString::new("Aa1!aaa".to_string().into());
//! let assessment = evaluate(&password);
//!
//! assert_eq!(assessment.score, 5.75);
//! assert_eq!(assessment.strength(), PasswordStrength::Medium);
//! assert!(!is_strong(&password));
//!
//! for rule in assessment.sorted_rules() {
//!     println!("[{}] {}", if rule.passed { "x" } else { " " }, rule.label);
//! }
//! ```

pub mod api_error;
pub mod config;
pub mod duration;
pub mod rules;
pub mod sites;
pub mod validation;

mod evaluator;
mod types;

#[cfg(feature = "async")]
pub mod refresh;
#[cfg(feature = "async")]
pub mod session;

// Public API
pub use evaluator::{evaluate, evaluate_str, is_strong, is_strong_str};
pub use rules::MAX_SCORE;
pub use types::{EvaluatedRule, PasswordAssessment, PasswordStrength};

#[cfg(feature = "async")]
pub use evaluator::evaluate_password_tx;
#[cfg(feature = "async")]
pub use refresh::{ProgressBar, RefreshScheduler, RefreshWindow, SchedulerError, SchedulerState};
