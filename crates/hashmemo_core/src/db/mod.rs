//! Memo database access: connection setup and the `memos` table.
//!
//! # Invariants
//! - Every connection handed out has the `memos` table in place.
//! - A file stamped with a newer schema version is refused, never rewritten.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
pub use schema::{ensure_schema, SCHEMA_VERSION};

pub type DbResult<T> = Result<T, DbError>;

/// Memo database failure.
#[derive(Debug)]
pub enum DbError {
    /// The memo database at `location` could not be opened or created.
    Open {
        location: String,
        source: rusqlite::Error,
    },
    /// A statement against the memo database failed.
    Sqlite(rusqlite::Error),
    /// The file was stamped by a newer hashmemo build.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open { location, source } => {
                write!(f, "cannot open memo database `{location}`: {source}")
            }
            Self::Sqlite(err) => write!(f, "memo database statement failed: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "memo database has schema version {found}, this build reads up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Open { source, .. } => Some(source),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
