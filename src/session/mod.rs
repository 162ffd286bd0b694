//! Pomodoro session core.
//!
//! Alternates work and break intervals for a configured number of breaks:
//! - Work/break state machine with cycle completion
//! - Cancellable countdown tokens and a polled one-second clock
//! - Fixed sets of offered durations
//! - Countdown and summary formatting

pub mod clock;
pub mod durations;
pub mod format;
pub mod state;

pub use clock::Ticker;
pub use durations::{DurationChoice, BREAK_COUNTS, BREAK_DURATIONS, WORK_DURATIONS};
pub use format::{format_countdown, format_elapsed, format_length};
pub use state::{
    CountdownToken, ElapsedSummary, EventKind, NextStep, Phase, SessionCore, SessionEvent,
    SessionSettings, SessionSnapshot,
};
