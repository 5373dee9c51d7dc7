//! The `memos` table and its version stamp.

use super::{DbError, DbResult};
use rusqlite::Connection;
use std::cmp::Ordering;

/// Schema version written to `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

const CREATE_MEMOS_SQL: &str = "CREATE TABLE IF NOT EXISTS memos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    tags TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL,
    updated_at TEXT
);";

/// Creates the `memos` table on a fresh database and stamps its version.
///
/// A database already at `SCHEMA_VERSION` is left untouched.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file carries a higher version.
/// - `Sqlite` when the table cannot be created.
pub fn ensure_schema(conn: &Connection) -> DbResult<()> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    match found.cmp(&SCHEMA_VERSION) {
        Ordering::Equal => Ok(()),
        Ordering::Greater => Err(DbError::UnsupportedSchemaVersion {
            found,
            supported: SCHEMA_VERSION,
        }),
        Ordering::Less => {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(CREATE_MEMOS_SQL)?;
            tx.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
            tx.commit()?;
            Ok(())
        }
    }
}
