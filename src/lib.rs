//! pomowork - a Pomodoro timer with a persistent to-do list
//!
//! This crate provides the work/break session state machine, a to-do store
//! persisted as one JSON blob in `SQLite`, and a terminal UI hosting both.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod core;
pub mod error;
pub mod session;
pub mod storage;
pub mod todo;
pub mod tui;

pub use error::PomoworkError;
pub use session::{SessionCore, SessionEvent, SessionSettings};
pub use todo::{ToDoItem, TodoStore};
