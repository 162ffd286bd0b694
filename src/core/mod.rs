//! Shared utilities for pomowork.

mod datetime;

pub use datetime::{format_due_date, parse_due_date};
