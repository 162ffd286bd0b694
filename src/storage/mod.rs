//! Storage layer for pomowork.
//!
//! Persistence is a key-value blob store: the to-do list is written as one
//! blob under a fixed key. `SQLite` backs it on disk; an in-memory store
//! serves tests and ephemeral runs.

mod blob;
mod database;
mod migrations;

pub use blob::{BlobStore, MemoryBlobStore, SqliteBlobStore};
pub use database::Database;

#[cfg(test)]
pub use blob::MockBlobStore;
