//! Output formatting for CLI display.

/// Format a distance for display, e.g. `2.22 km`.
pub(super) fn format_distance(km: f64) -> String {
    format!("{km:.2} km")
}

/// Format a duration in seconds as minutes and seconds, e.g. `10m 00s`.
pub(super) fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{}m {:02}s", total / 60, total % 60)
}
