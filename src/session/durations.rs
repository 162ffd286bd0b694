//! Offered interval choices.
//!
//! Durations are picked from fixed label sets. Each label maps to a number
//! of seconds once, when a selection is made; nothing is parsed while a
//! countdown is running.

use log::warn;

/// One offered duration: a display label and its length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationChoice {
    /// Label shown in pickers and written to the config file.
    pub label: &'static str,
    /// Interval length in seconds.
    pub seconds: u32,
}

impl DurationChoice {
    const fn new(label: &'static str, seconds: u32) -> Self {
        Self { label, seconds }
    }
}

impl std::fmt::Display for DurationChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Work interval lengths offered to the user.
pub const WORK_DURATIONS: [DurationChoice; 13] = [
    DurationChoice::new("10s", 10),
    DurationChoice::new("1m", 60),
    DurationChoice::new("10m", 600),
    DurationChoice::new("15m", 900),
    DurationChoice::new("20m", 1200),
    DurationChoice::new("25m", 1500),
    DurationChoice::new("30m", 1800),
    DurationChoice::new("35m", 2100),
    DurationChoice::new("40m", 2400),
    DurationChoice::new("45m", 2700),
    DurationChoice::new("50m", 3000),
    DurationChoice::new("55m", 3300),
    DurationChoice::new("60m", 3600),
];

/// Break interval lengths offered to the user.
pub const BREAK_DURATIONS: [DurationChoice; 8] = [
    DurationChoice::new("10s", 10),
    DurationChoice::new("1m", 60),
    DurationChoice::new("5m", 300),
    DurationChoice::new("10m", 600),
    DurationChoice::new("15m", 900),
    DurationChoice::new("20m", 1200),
    DurationChoice::new("25m", 1500),
    DurationChoice::new("30m", 1800),
];

/// Number of breaks per cycle offered to the user.
pub const BREAK_COUNTS: [u32; 5] = [1, 2, 3, 4, 5];

/// Default work label.
pub const DEFAULT_WORK_LABEL: &str = "10s";
/// Default break label.
pub const DEFAULT_BREAK_LABEL: &str = "10s";
/// Default number of breaks per cycle.
pub const DEFAULT_BREAK_COUNT: u32 = 1;

/// Find a choice by label in an option set.
#[must_use]
pub fn find(options: &[DurationChoice], label: &str) -> Option<DurationChoice> {
    let label = label.trim();
    options.iter().copied().find(|c| c.label == label)
}

/// Seconds for a work duration label.
///
/// Unknown labels degrade to a zero-length interval.
#[must_use]
pub fn work_seconds(label: &str) -> u32 {
    seconds_or_zero(&WORK_DURATIONS, label)
}

/// Seconds for a break duration label.
///
/// Unknown labels degrade to a zero-length interval.
#[must_use]
pub fn break_seconds(label: &str) -> u32 {
    seconds_or_zero(&BREAK_DURATIONS, label)
}

fn seconds_or_zero(options: &[DurationChoice], label: &str) -> u32 {
    find(options, label).map_or_else(
        || {
            warn!("Unrecognized duration label {label:?}, using 0 seconds");
            0
        },
        |c| c.seconds,
    )
}

/// Label for a number of seconds, if it is one of the offered choices.
#[must_use]
pub fn label_for(options: &[DurationChoice], seconds: u32) -> Option<&'static str> {
    options.iter().find(|c| c.seconds == seconds).map(|c| c.label)
}

/// Position of `seconds` in an option set, or 0 when it is not offered.
#[must_use]
pub fn index_of(options: &[DurationChoice], seconds: u32) -> usize {
    options.iter().position(|c| c.seconds == seconds).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_seconds() {
        assert_eq!(work_seconds("10s"), 10);
        assert_eq!(work_seconds("1m"), 60);
        assert_eq!(work_seconds("25m"), 1500);
        assert_eq!(work_seconds("60m"), 3600);
    }

    #[test]
    fn test_break_seconds() {
        assert_eq!(break_seconds("10s"), 10);
        assert_eq!(break_seconds("5m"), 300);
        assert_eq!(break_seconds("30m"), 1800);
    }

    #[test]
    fn test_unknown_label_falls_back_to_zero() {
        assert_eq!(work_seconds("forever"), 0);
        assert_eq!(work_seconds(""), 0);
        // 5m is offered for breaks only
        assert_eq!(work_seconds("5m"), 0);
        assert_eq!(break_seconds("60m"), 0);
    }

    #[test]
    fn test_find_trims_label() {
        assert_eq!(find(&WORK_DURATIONS, " 20m ").map(|c| c.seconds), Some(1200));
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(&BREAK_DURATIONS, 300), Some("5m"));
        assert_eq!(label_for(&BREAK_DURATIONS, 7), None);
    }

    #[test]
    fn test_index_of() {
        assert_eq!(index_of(&WORK_DURATIONS, 1500), 5);
        assert_eq!(index_of(&WORK_DURATIONS, 42), 0);
    }

    #[test]
    fn test_all_offered_durations_are_positive() {
        assert!(WORK_DURATIONS.iter().all(|c| c.seconds > 0));
        assert!(BREAK_DURATIONS.iter().all(|c| c.seconds > 0));
        assert!(BREAK_COUNTS.iter().all(|&n| n > 0));
    }

    #[test]
    fn test_defaults_are_offered() {
        assert!(find(&WORK_DURATIONS, DEFAULT_WORK_LABEL).is_some());
        assert!(find(&BREAK_DURATIONS, DEFAULT_BREAK_LABEL).is_some());
        assert!(BREAK_COUNTS.contains(&DEFAULT_BREAK_COUNT));
    }
}
