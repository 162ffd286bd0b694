//! Persistent to-do list.
//!
//! Items are kept in insertion order, shown sorted by due date, and saved
//! as one JSON blob after every change.

mod item;
mod store;

pub use item::{color_hint, ColorHint, ToDoItem};
pub use store::TodoStore;
