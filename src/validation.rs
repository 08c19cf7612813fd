//! Form field validation.
//!
//! Validators append a message to [`FieldErrors`] under the given field key
//! and leave it untouched when the value is acceptable.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

use crate::evaluator::is_strong;

/// Field key -> error message.
pub type FieldErrors = BTreeMap<String, String>;

pub const USERNAME_REQUIRED: &str = "Username is required.";
pub const USERNAME_INVALID: &str = "Username must be 4 to 16 characters long and contain only lowercase letters, digits, dashes or underscores.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const PASSWORD_TOO_WEAK: &str = "Password is not strong enough.";
pub const PASSWORDS_MISMATCH: &str = "Passwords do not match.";

// Literal pattern; compiling it cannot fail at runtime.
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9\-_]{4,16}$").expect("username pattern is a valid regex"));

/// Returns `true` if `username` matches the accepted pattern.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_PATTERN.is_match(username)
}

pub fn validate_username(username: &str, errors: &mut FieldErrors, key: &str) {
    if username.is_empty() {
        errors.insert(key.to_string(), USERNAME_REQUIRED.to_string());
    } else if !is_valid_username(username) {
        errors.insert(key.to_string(), USERNAME_INVALID.to_string());
    }
}

/// Presence check only, used for the current password on login or edit.
pub fn validate_password(password: &SecretString, errors: &mut FieldErrors, key: &str) {
    if password.expose_secret().is_empty() {
        errors.insert(key.to_string(), PASSWORD_REQUIRED.to_string());
    }
}

/// A new password must be strong and match its confirmation.
///
/// Strength is reported first; the confirmation is only compared once the
/// password itself is acceptable.
pub fn validate_new_password(
    password: &SecretString,
    confirmation: &SecretString,
    errors: &mut FieldErrors,
    key: &str,
    confirm_key: &str,
) {
    if !is_strong(password) {
        errors.insert(key.to_string(), PASSWORD_TOO_WEAK.to_string());
    } else if password.expose_secret() != confirmation.expose_secret() {
        errors.insert(confirm_key.to_string(), PASSWORDS_MISMATCH.to_string());
    }
}
