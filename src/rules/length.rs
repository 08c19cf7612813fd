//! Length rule - partial credit up to the minimum length.

use super::RuleOutcome;

pub const MIN_LENGTH: usize = 8;

/// Scores `len / MIN_LENGTH`.
///
/// Length is counted in UTF-16 code units, the way browser clients measure a
/// string, so a character outside the Basic Multilingual Plane counts twice.
/// Short passwords earn a fraction of the rule weight but do not pass.
pub fn length_rule(password: &str) -> RuleOutcome {
    let len = password.encode_utf16().count();
    RuleOutcome::Partial(len as f64 / MIN_LENGTH as f64)
}
