//! Persistent to-do list.
//!
//! The in-memory list is the source of truth. Every mutation writes the
//! whole list to the blob store as JSON; if that write fails the mutation
//! is undone so memory and storage never disagree.

use chrono::NaiveDate;
use log::{debug, info, warn};
use uuid::Uuid;

use super::item::ToDoItem;
use crate::error::PomoworkError;
use crate::storage::BlobStore;

/// Insertion-ordered to-do list backed by a [`BlobStore`].
pub struct TodoStore<B: BlobStore> {
    blob: B,
    items: Vec<ToDoItem>,
}

impl<B: BlobStore> TodoStore<B> {
    /// Load the list from `blob`.
    ///
    /// A missing, unreadable, or corrupt blob yields an empty list.
    pub fn load(blob: B) -> Self {
        let items = match blob.load() {
            Ok(Some(bytes)) => serde_json::from_slice(&bytes).unwrap_or_else(|e| {
                warn!("Discarding corrupt to-do data: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Could not read to-do data, starting empty: {e}");
                Vec::new()
            }
        };

        info!("Loaded {} to-do items", items.len());
        Self { blob, items }
    }

    /// Add a new item due on `due_date`.
    ///
    /// # Errors
    ///
    /// Returns `Validation` if `text` is empty, or `Database` if the list
    /// cannot be saved.
    pub fn add(&mut self, text: &str, due_date: NaiveDate) -> Result<ToDoItem, PomoworkError> {
        let text = validate_text(text)?;

        let item = ToDoItem {
            id: self.fresh_id(),
            done: false,
            text,
            due_date,
        };

        self.mutate(|items| {
            items.push(item.clone());
            Ok(())
        })?;

        debug!("Added to-do {}", item.id);
        Ok(item)
    }

    /// Replace the text and due date of an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item has `id`, `Validation` if `text` is
    /// empty, or `Database` if the list cannot be saved.
    pub fn edit(
        &mut self,
        id: Uuid,
        text: &str,
        due_date: NaiveDate,
    ) -> Result<(), PomoworkError> {
        let index = self.index_of(id)?;
        let text = validate_text(text)?;

        self.mutate(|items| {
            let item = &mut items[index];
            item.text = text;
            item.due_date = due_date;
            Ok(())
        })?;

        debug!("Edited to-do {id}");
        Ok(())
    }

    /// Check or uncheck an item.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item has `id`, or `Database` if the list
    /// cannot be saved.
    pub fn set_done(&mut self, id: Uuid, done: bool) -> Result<(), PomoworkError> {
        let index = self.index_of(id)?;

        self.mutate(|items| {
            items[index].done = done;
            Ok(())
        })
    }

    /// Remove an item, returning it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no item has `id`, or `Database` if the list
    /// cannot be saved.
    pub fn delete(&mut self, id: Uuid) -> Result<ToDoItem, PomoworkError> {
        let index = self.index_of(id)?;
        let mut removed = None;

        self.mutate(|items| {
            removed = Some(items.remove(index));
            Ok(())
        })?;

        debug!("Deleted to-do {id}");
        removed.ok_or_else(|| PomoworkError::NotFound(format!("to-do {id}")))
    }

    /// Look up an item.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&ToDoItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Current items, in insertion order or ascending by due date.
    ///
    /// The sort is stable: items due the same day keep insertion order.
    #[must_use]
    pub fn list(&self, sorted_by_due_date: bool) -> Vec<ToDoItem> {
        let mut items = self.items.clone();
        if sorted_by_due_date {
            items.sort_by_key(|item| item.due_date);
        }
        items
    }

    /// Items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[ToDoItem] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Apply `change` and persist, restoring the previous list on failure.
    fn mutate(
        &mut self,
        change: impl FnOnce(&mut Vec<ToDoItem>) -> Result<(), PomoworkError>,
    ) -> Result<(), PomoworkError> {
        let previous = self.items.clone();
        change(&mut self.items)?;

        if let Err(e) = self.persist() {
            warn!("Save failed, rolling back: {e}");
            self.items = previous;
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), PomoworkError> {
        let bytes = serde_json::to_vec(&self.items)?;
        self.blob.save(&bytes)
    }

    fn index_of(&self, id: Uuid) -> Result<usize, PomoworkError> {
        self.items
            .iter()
            .position(|item| item.id == id)
            .ok_or_else(|| PomoworkError::NotFound(format!("to-do {id}")))
    }

    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.get(id).is_none() {
                return id;
            }
        }
    }
}

/// Whitespace-only text counts as empty; accepted text is kept as typed.
fn validate_text(text: &str) -> Result<String, PomoworkError> {
    if text.trim().is_empty() {
        return Err(PomoworkError::Validation("Enter a to-do.".to_string()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{Database, MemoryBlobStore, MockBlobStore, SqliteBlobStore};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn empty_store() -> TodoStore<MemoryBlobStore> {
        TodoStore::load(MemoryBlobStore::new())
    }

    #[test]
    fn test_add_and_list() {
        let mut store = empty_store();
        let item = store.add("Buy milk", date(2024, 6, 15)).unwrap();

        assert!(!item.done);
        let items = store.list(false);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].text, "Buy milk");
        assert_eq!(items[0].due_date, date(2024, 6, 15));
        assert_eq!(items[0].id, item.id);
    }

    #[test]
    fn test_add_empty_text_fails() {
        let mut store = empty_store();

        let err = store.add("", date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, PomoworkError::Validation(_)));

        let err = store.add("   ", date(2024, 6, 15)).unwrap_err();
        assert!(matches!(err, PomoworkError::Validation(_)));

        assert!(store.is_empty());
    }

    #[test]
    fn test_add_persists_whole_list() {
        let mut store = empty_store();
        store.add("One", date(2024, 6, 15)).unwrap();
        store.add("Two", date(2024, 6, 16)).unwrap();

        let saved: Vec<ToDoItem> =
            serde_json::from_slice(&store.blob.value().unwrap()).unwrap();
        assert_eq!(saved, store.items());
    }

    #[test]
    fn test_ids_are_unique() {
        let mut store = empty_store();
        let a = store.add("A", date(2024, 6, 15)).unwrap();
        let b = store.add("A", date(2024, 6, 15)).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_edit() {
        let mut store = empty_store();
        let item = store.add("Draft", date(2024, 6, 15)).unwrap();

        store.edit(item.id, "Final", date(2024, 7, 1)).unwrap();

        let edited = store.get(item.id).unwrap();
        assert_eq!(edited.text, "Final");
        assert_eq!(edited.due_date, date(2024, 7, 1));
        assert_eq!(edited.id, item.id);
    }

    #[test]
    fn test_text_is_stored_as_typed() {
        let mut store = empty_store();
        let item = store.add("  Call mom ", date(2024, 6, 15)).unwrap();
        assert_eq!(item.text, "  Call mom ");

        store.edit(item.id, " Call dad", date(2024, 6, 15)).unwrap();
        assert_eq!(store.get(item.id).unwrap().text, " Call dad");
    }

    #[test]
    fn test_edit_unknown_id_leaves_list_unchanged() {
        let mut store = empty_store();
        store.add("Keep", date(2024, 6, 15)).unwrap();
        let before = store.list(false);

        let err = store
            .edit(Uuid::new_v4(), "Changed", date(2024, 7, 1))
            .unwrap_err();

        assert!(matches!(err, PomoworkError::NotFound(_)));
        assert_eq!(store.list(false), before);
    }

    #[test]
    fn test_edit_empty_text_fails() {
        let mut store = empty_store();
        let item = store.add("Keep", date(2024, 6, 15)).unwrap();

        let err = store.edit(item.id, "", date(2024, 7, 1)).unwrap_err();
        assert!(matches!(err, PomoworkError::Validation(_)));
        assert_eq!(store.get(item.id).unwrap().text, "Keep");
    }

    #[test]
    fn test_delete() {
        let mut store = empty_store();
        let keep = store.add("Keep", date(2024, 6, 15)).unwrap();
        let drop = store.add("Drop", date(2024, 6, 16)).unwrap();

        let removed = store.delete(drop.id).unwrap();
        assert_eq!(removed.text, "Drop");

        let items = store.list(false);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, keep.id);
        assert!(store.get(drop.id).is_none());
    }

    #[test]
    fn test_delete_unknown_id() {
        let mut store = empty_store();
        let err = store.delete(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, PomoworkError::NotFound(_)));
    }

    #[test]
    fn test_set_done() {
        let mut store = empty_store();
        let item = store.add("Check me", date(2024, 6, 15)).unwrap();

        store.set_done(item.id, true).unwrap();
        assert!(store.get(item.id).unwrap().done);

        store.set_done(item.id, false).unwrap();
        assert!(!store.get(item.id).unwrap().done);

        assert!(matches!(
            store.set_done(Uuid::new_v4(), true),
            Err(PomoworkError::NotFound(_))
        ));
    }

    #[test]
    fn test_list_sorted_by_due_date_is_stable() {
        let mut store = empty_store();
        store.add("Late", date(2024, 6, 20)).unwrap();
        store.add("Early A", date(2024, 6, 10)).unwrap();
        store.add("Middle", date(2024, 6, 15)).unwrap();
        store.add("Early B", date(2024, 6, 10)).unwrap();

        let sorted: Vec<String> = store.list(true).into_iter().map(|i| i.text).collect();
        assert_eq!(sorted, vec!["Early A", "Early B", "Middle", "Late"]);

        let unsorted: Vec<String> = store.list(false).into_iter().map(|i| i.text).collect();
        assert_eq!(unsorted, vec!["Late", "Early A", "Middle", "Early B"]);
    }

    #[test]
    fn test_reload_yields_identical_collection() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let items = {
            let blob = SqliteBlobStore::new(Database::open_at(&db_path).unwrap(), "todos");
            let mut store = TodoStore::load(blob);
            let a = store.add("A", date(2024, 6, 15)).unwrap();
            store.add("B", date(2024, 6, 1)).unwrap();
            store.set_done(a.id, true).unwrap();
            store.list(false)
        };

        let blob = SqliteBlobStore::new(Database::open_at(&db_path).unwrap(), "todos");
        let reloaded = TodoStore::load(blob);
        assert_eq!(reloaded.list(false), items);
    }

    #[test]
    fn test_load_corrupt_blob_is_empty() {
        let store = TodoStore::load(MemoryBlobStore::with_value(b"{not json".to_vec()));
        assert!(store.is_empty());

        let store = TodoStore::load(MemoryBlobStore::with_value(b"{\"id\": 1}".to_vec()));
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_read_error_is_empty() {
        let mut blob = MockBlobStore::new();
        blob.expect_load()
            .returning(|| Err(PomoworkError::Database("disk gone".to_string())));

        let store = TodoStore::load(blob);
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_failure_rolls_back() {
        let mut blob = MockBlobStore::new();
        blob.expect_load().returning(|| Ok(None));
        blob.expect_save()
            .times(1)
            .returning(|_| Err(PomoworkError::Database("disk full".to_string())));

        let mut store = TodoStore::load(blob);
        let err = store.add("Lost", date(2024, 6, 15)).unwrap_err();

        assert!(matches!(err, PomoworkError::Database(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_rejected_operations_do_not_save() {
        let mut blob = MockBlobStore::new();
        blob.expect_load().returning(|| Ok(None));
        blob.expect_save().never();

        let mut store = TodoStore::load(blob);
        assert!(store.add("", date(2024, 6, 15)).is_err());
        assert!(store.delete(Uuid::new_v4()).is_err());
        assert!(store
            .edit(Uuid::new_v4(), "text", date(2024, 6, 15))
            .is_err());
    }
}
