//! Duration formatting for countdowns and cycle summaries.

/// Format seconds as a countdown, `MM:SS`.
///
/// Minutes are not wrapped into hours, so an hour-long interval reads `60:00`.
#[must_use]
pub fn format_countdown(seconds: u64) -> String {
    let minutes = seconds / 60;
    let seconds = seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as an elapsed total, `HHh MMm SSs`.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let seconds = seconds % 60;
    format!("{hours:02}h {minutes:02}m {seconds:02}s")
}

/// Format seconds as a human-readable length ("25 minutes", "10 seconds").
#[must_use]
pub fn format_length(seconds: u64) -> String {
    if seconds < 60 {
        return format!("{} second{}", seconds, if seconds == 1 { "" } else { "s" });
    }

    let total_minutes = seconds / 60;
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                if hours == 1 { "" } else { "s" },
                minutes,
                if minutes == 1 { "" } else { "s" }
            )
        } else {
            format!("{} hour{}", hours, if hours == 1 { "" } else { "s" })
        }
    } else {
        format!("{} minute{}", minutes, if minutes == 1 { "" } else { "s" })
    }
}
