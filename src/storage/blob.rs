//! Key-value blob persistence.
//!
//! A [`BlobStore`] holds one opaque byte blob. Every save replaces the
//! previous value as a whole.

use std::cell::RefCell;

use chrono::Utc;
use log::debug;
use rusqlite::{params, OptionalExtension};

use crate::error::PomoworkError;

use super::Database;

/// Durable storage for a single blob.
#[cfg_attr(test, mockall::automock)]
pub trait BlobStore {
    /// Read the stored blob, or `None` if nothing was saved yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be read.
    fn load(&self) -> Result<Option<Vec<u8>>, PomoworkError>;

    /// Replace the stored blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be written.
    fn save(&self, bytes: &[u8]) -> Result<(), PomoworkError>;
}

/// In-memory blob store.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    value: RefCell<Option<Vec<u8>>>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `bytes`.
    #[must_use]
    pub fn with_value(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            value: RefCell::new(Some(bytes.into())),
        }
    }

    /// Copy of the current value.
    #[must_use]
    pub fn value(&self) -> Option<Vec<u8>> {
        self.value.borrow().clone()
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self) -> Result<Option<Vec<u8>>, PomoworkError> {
        Ok(self.value())
    }

    fn save(&self, bytes: &[u8]) -> Result<(), PomoworkError> {
        *self.value.borrow_mut() = Some(bytes.to_vec());
        Ok(())
    }
}

/// Blob store backed by one row of the `kv` table.
pub struct SqliteBlobStore {
    db: Database,
    key: String,
}

impl SqliteBlobStore {
    /// Create a store for `key` in `db`.
    pub fn new(db: Database, key: impl Into<String>) -> Self {
        Self {
            db,
            key: key.into(),
        }
    }

    /// Key this store reads and writes.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl BlobStore for SqliteBlobStore {
    fn load(&self) -> Result<Option<Vec<u8>>, PomoworkError> {
        self.db
            .connection()
            .query_row("SELECT value FROM kv WHERE key = ?1", [&self.key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| PomoworkError::Database(format!("Failed to load {}: {e}", self.key)))
    }

    fn save(&self, bytes: &[u8]) -> Result<(), PomoworkError> {
        // A single upsert statement replaces the row atomically.
        self.db
            .connection()
            .execute(
                r"INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at",
                params![self.key, bytes, Utc::now().to_rfc3339()],
            )
            .map_err(|e| PomoworkError::Database(format!("Failed to save {}: {e}", self.key)))?;

        debug!("Saved {} bytes under {}", bytes.len(), self.key);
        Ok(())
    }
}
