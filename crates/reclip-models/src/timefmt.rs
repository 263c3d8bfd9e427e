//! Display formatting for timeline positions and clip durations.

/// Formats a timeline position as `M:SS`, e.g. `90.7` -> `"1:30"`.
///
/// Fractional seconds are floored; minutes are not zero-padded.
pub fn format_timestamp(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    let mins = total / 60;
    let secs = total % 60;
    format!("{}:{:02}", mins, secs)
}

/// Formats the length of a span for display.
///
/// Under a minute: `"42 seconds"`. Otherwise `"1m 30s"`, collapsing to
/// `"2 minutes"` when the span is a whole number of minutes.
pub fn format_duration(start_time: f64, end_time: f64) -> String {
    let duration = (end_time - start_time).round() as i64;
    if duration < 60 {
        return format!("{} seconds", duration);
    }
    let mins = duration / 60;
    let secs = duration % 60;
    if secs > 0 {
        format!("{}m {}s", mins, secs)
    } else if mins > 1 {
        format!("{} minutes", mins)
    } else {
        format!("{} minute", mins)
    }
}
