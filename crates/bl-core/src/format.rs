//! Duration and recency formatting shared by every rendered surface.

/// Formats a whole-minute duration as `Xh Ym` when >= 1 hour, `Ym` otherwise.
/// Negative durations are treated as 0m.
#[must_use]
pub fn format_duration(minutes: i64) -> String {
    if minutes < 0 {
        return "0m".to_string();
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours >= 1 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Formats a fractional-minute total as `Hh Mm`.
///
/// Used for sleep totals and averages, which are kept fractional upstream to
/// avoid compounding rounding error; the remainder is rounded here, once.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn format_duration_frac(minutes: f64) -> String {
    let minutes = minutes.max(0.0);
    let mut hours = (minutes / 60.0).floor() as i64;
    let mut mins = (minutes % 60.0).round() as i64;
    if mins == 60 {
        hours += 1;
        mins = 0;
    }
    format!("{hours}h {mins}m")
}

/// Formats elapsed minutes as a recency string: `Xh Ym ago` / `Ym ago`.
///
/// Negative elapsed values (clock skew, future-dated events) clamp to
/// `just now` rather than rendering a negative duration.
#[must_use]
pub fn format_time_since(minutes: i64) -> String {
    if minutes < 0 {
        return "just now".to_string();
    }
    format!("{} ago", format_duration(minutes))
}
