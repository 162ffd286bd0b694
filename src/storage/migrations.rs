//! Database migrations for pomowork.
//!
//! Each migration upgrades the schema by one version. Migrations run
//! automatically when the database is opened.

use rusqlite::Connection;

use crate::error::PomoworkError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 for a new database.
pub fn get_version(conn: &Connection) -> Result<i32, PomoworkError> {
    conn.query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| PomoworkError::Database(format!("Failed to get schema version: {e}")))
}

fn set_version(conn: &Connection, version: i32) -> Result<(), PomoworkError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| PomoworkError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), PomoworkError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

fn run_migration(conn: &Connection, version: i32) -> Result<(), PomoworkError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(PomoworkError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: key-value table holding opaque blobs.
fn migrate_v1(conn: &Connection) -> Result<(), PomoworkError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value BLOB NOT NULL,
            updated_at TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| PomoworkError::Database(format!("Migration v1 failed: {e}")))
}
