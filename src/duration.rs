//! Human-readable durations for user-facing messages.

const UNITS: [(u64, &str); 4] = [(86_400, "day"), (3_600, "hour"), (60, "minute"), (1, "second")];

/// Formats a number of seconds using its two most significant non-zero units.
///
/// `3725` becomes `"1 hour 2 minutes"`; the seconds are dropped. Zero yields an
/// empty string.
pub fn format_duration_seconds(seconds: u64) -> String {
    let mut rest = seconds;
    UNITS
        .iter()
        .map(|&(size, unit)| {
            let value = rest / size;
            rest %= size;
            (value, unit)
        })
        .filter(|&(value, _)| value > 0)
        .take(2)
        .map(|(value, unit)| {
            let plural = if value > 1 { "s" } else { "" };
            format!("{value} {unit}{plural}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}
