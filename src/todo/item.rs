//! To-do items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToDoItem {
    /// Unique, never reused identifier.
    pub id: Uuid,
    /// Whether the entry is checked off.
    pub done: bool,
    /// What to do. Never empty once stored.
    pub text: String,
    /// Day the entry is due.
    pub due_date: NaiveDate,
}

impl ToDoItem {
    /// Display classification relative to `today`.
    #[must_use]
    pub fn color_hint(&self, today: NaiveDate) -> ColorHint {
        color_hint(self, today)
    }
}

/// How an item should be highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorHint {
    /// Due today or later.
    Normal,
    /// Due date has passed.
    Overdue,
}

/// Classify `item` as overdue when its due date is strictly before `today`.
#[must_use]
pub fn color_hint(item: &ToDoItem, today: NaiveDate) -> ColorHint {
    if item.due_date < today {
        ColorHint::Overdue
    } else {
        ColorHint::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(due: NaiveDate) -> ToDoItem {
        ToDoItem {
            id: Uuid::new_v4(),
            done: false,
            text: "Write report".to_string(),
            due_date: due,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_color_hint() {
        let today = date(2024, 6, 15);

        assert_eq!(color_hint(&item(date(2024, 6, 14)), today), ColorHint::Overdue);
        assert_eq!(color_hint(&item(date(2023, 12, 31)), today), ColorHint::Overdue);
        assert_eq!(item(date(2024, 6, 15)).color_hint(today), ColorHint::Normal);
        assert_eq!(item(date(2024, 6, 16)).color_hint(today), ColorHint::Normal);
    }

    #[test]
    fn test_serialized_field_names() {
        let todo = item(date(2024, 6, 15));
        let json = serde_json::to_value(&todo).unwrap();

        assert_eq!(json["dueDate"], "2024-06-15");
        assert_eq!(json["done"], false);
        assert_eq!(json["text"], "Write report");
        assert_eq!(json["id"], todo.id.to_string());
    }
}
