//! Due-date entry parsing.
//!
//! Accepts the short natural-language forms people type into a date field:
//! - `today`, `tomorrow`, `yesterday`
//! - `monday`, `fri`, `next tuesday` (next occurrence)
//! - `next week` (next Monday)
//! - `in 3 days`, `in 2 weeks`
//! - `dec 15`, `december 15` (this year, or next if already past)
//! - `2024-12-15`, `12/15`, `12/15/2024`

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Parse a due date relative to `today`.
///
/// Returns `None` if the input is not recognized.
#[must_use]
pub fn parse_due_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let input = input.trim().to_lowercase();

    match input.as_str() {
        "today" | "" => return Some(today),
        "tomorrow" => return today.succ_opt(),
        "yesterday" => return today.pred_opt(),
        "next week" => return next_weekday(today, Weekday::Mon),
        _ => {},
    }

    parse_relative_offset(&input, today)
        .or_else(|| parse_weekday(&input, today))
        .or_else(|| parse_month_day(&input, today))
        .or_else(|| NaiveDate::parse_from_str(&input, "%Y-%m-%d").ok())
        .or_else(|| parse_us_date(&input, today))
}

/// Format a due date for display and for pre-filling edit forms.
#[must_use]
pub fn format_due_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse "in X days/weeks".
fn parse_relative_offset(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 3 || parts[0] != "in" {
        return None;
    }

    let amount: i64 = parts[1].parse().ok()?;
    let days = match parts[2].trim_end_matches('s') {
        "day" => amount,
        "week" => amount.checked_mul(7)?,
        _ => return None,
    };

    add_days(today, days)
}

/// Parse weekday names, optionally prefixed with "next".
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let day_str = input.strip_prefix("next ").unwrap_or(input);

    let target = match day_str {
        "monday" | "mon" => Weekday::Mon,
        "tuesday" | "tue" | "tues" => Weekday::Tue,
        "wednesday" | "wed" => Weekday::Wed,
        "thursday" | "thu" | "thur" | "thurs" => Weekday::Thu,
        "friday" | "fri" => Weekday::Fri,
        "saturday" | "sat" => Weekday::Sat,
        "sunday" | "sun" => Weekday::Sun,
        _ => return None,
    };

    next_weekday(today, target)
}

/// First `target` strictly after `today`.
fn next_weekday(today: NaiveDate, target: Weekday) -> Option<NaiveDate> {
    let days_until = (i64::from(target.num_days_from_sunday())
        - i64::from(today.weekday().num_days_from_sunday())
        + 7)
        % 7;
    let days = if days_until == 0 { 7 } else { days_until };
    add_days(today, days)
}

/// `today` shifted by `days`, or `None` past the representable range.
fn add_days(today: NaiveDate, days: i64) -> Option<NaiveDate> {
    today.checked_add_signed(Duration::try_days(days)?)
}

/// Parse "dec 15" / "december 15".
fn parse_month_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.len() != 2 {
        return None;
    }

    let month = parse_month_name(parts[0])?;
    let day: u32 = parts[1].parse().ok()?;
    upcoming(today, month, day)
}

fn parse_month_name(input: &str) -> Option<u32> {
    match input {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Parse MM/DD or MM/DD/YYYY.
fn parse_us_date(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let parts: Vec<&str> = input.split('/').collect();

    match parts.len() {
        2 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;
            upcoming(today, month, day)
        },
        3 => {
            let month: u32 = parts[0].parse().ok()?;
            let day: u32 = parts[1].parse().ok()?;
            let year: i32 = parts[2].parse().ok()?;
            let year = if year < 100 { 2000 + year } else { year };
            NaiveDate::from_ymd_opt(year, month, day)
        },
        _ => None,
    }
}

/// `month`/`day` this year, or next year if that date has passed.
fn upcoming(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if date < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(date)
    }
}
