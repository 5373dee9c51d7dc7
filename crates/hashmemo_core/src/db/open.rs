//! Per-call SQLite connections for the memo store.
//!
//! Returned connections have the `memos` table in place and wait up to
//! `BUSY_TIMEOUT` on a locked file.

use super::schema::ensure_schema;
use super::{DbError, DbResult};
use log::{debug, error};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);
const IN_MEMORY_LOCATION: &str = ":memory:";

/// Opens the memo database file, creating it when missing.
///
/// # Side effects
/// - Emits `db_open` debug events with duration and status.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    open_with(path.display().to_string(), || Connection::open(path))
}

/// Opens an independent, empty in-memory memo database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with(IN_MEMORY_LOCATION.to_string(), Connection::open_in_memory)
}

fn open_with(
    location: String,
    open: impl FnOnce() -> rusqlite::Result<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();

    let conn = match open() {
        Ok(conn) => conn,
        Err(source) => {
            error!(
                "event=db_open module=db status=error location={} duration_ms={} error_code=db_open_failed error={}",
                location,
                started_at.elapsed().as_millis(),
                source
            );
            return Err(DbError::Open { location, source });
        }
    };

    let prepared = conn
        .busy_timeout(BUSY_TIMEOUT)
        .map_err(DbError::from)
        .and_then(|()| ensure_schema(&conn));
    match prepared {
        Ok(()) => {
            debug!(
                "event=db_open module=db status=ok location={} duration_ms={}",
                location,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error location={} duration_ms={} error_code=db_schema_failed error={}",
                location,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}
