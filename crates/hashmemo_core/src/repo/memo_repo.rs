//! Memo store contract and SQLite implementation.
//!
//! # Responsibility
//! - Own durable memo state: identity, timestamps, CRUD.
//! - Provide keyword and tag lookups over the `memos` table.
//!
//! # Invariants
//! - Every operation acquires its own connection and releases it before
//!   returning, on success and on failure alike.
//! - Keyword matching is literal and case-sensitive; `%` and `_` never act as
//!   wildcards.
//! - Tag lookups end with an exact element match on the parsed tag list.
//! - Storage failures surface as `RepoError::DataAccess`; a missing row on
//!   update/delete is reported as `false`, never as an error.

use crate::db::{open_db, DbError, DbResult};
use crate::model::memo::{Memo, MemoDraft, MemoId};
use crate::model::tags::{join_tags, parse_tags};
use log::{debug, error, warn};
use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Instant;

const MEMO_SELECT_SQL: &str = "SELECT
    id,
    title,
    body,
    tags,
    created_at,
    updated_at
FROM memos";

/// UTC text timestamp with millisecond precision; sorts chronologically.
const NOW_SQL: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";

pub type RepoResult<T> = Result<T, RepoError>;

/// Store error. Data access is the only failure kind the store raises.
#[derive(Debug)]
pub enum RepoError {
    /// The database could not be opened, a write was rejected, or a read
    /// failed.
    DataAccess {
        operation: &'static str,
        source: DbError,
    },
}

impl RepoError {
    /// Name of the store operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::DataAccess { operation, .. } => operation,
        }
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DataAccess { operation, source } => {
                write!(f, "memo data access failed during `{operation}`: {source}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::DataAccess { source, .. } => Some(source),
        }
    }
}

/// Repository interface for memo persistence and queries.
pub trait MemoStore {
    /// Inserts a draft and returns the persisted memo with `id` and
    /// `created_at` assigned.
    fn create(&self, draft: &MemoDraft) -> RepoResult<Memo>;
    /// Gets one memo by id.
    fn get(&self, id: MemoId) -> RepoResult<Option<Memo>>;
    /// Lists every memo in insertion order.
    fn get_all(&self) -> RepoResult<Vec<Memo>>;
    /// Overwrites title/body/tags and stamps `updated_at`.
    ///
    /// Returns `false` when no row matches `memo.id()`.
    fn update(&self, memo: &Memo) -> RepoResult<bool>;
    /// Hard-deletes by id. Returns `true` iff a row was removed.
    fn delete_by_id(&self, id: MemoId) -> RepoResult<bool>;
    /// Case-sensitive literal substring match on title or body.
    fn find_by_keyword(&self, keyword: &str) -> RepoResult<Vec<Memo>>;
    /// Exact case-sensitive tag element match.
    fn find_by_tag(&self, tag: &str) -> RepoResult<Vec<Memo>>;
    /// Distinct non-empty tags, lexicographically ordered.
    fn get_all_tags(&self) -> RepoResult<BTreeSet<String>>;

    /// Hard-deletes the given memo.
    fn delete(&self, memo: &Memo) -> RepoResult<bool> {
        self.delete_by_id(memo.id())
    }
}

/// SQLite-backed memo store.
///
/// Holds only the database location; connections are opened per call.
#[derive(Debug, Clone)]
pub struct SqliteMemoStore {
    db_path: PathBuf,
}

impl SqliteMemoStore {
    /// Creates a store for `db_path` without touching the file.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Creates a store and verifies the database can be opened and set up.
    ///
    /// # Errors
    /// - Returns `RepoError::DataAccess` when the file cannot be opened or the
    ///   schema cannot be applied.
    pub fn open(db_path: impl Into<PathBuf>) -> RepoResult<Self> {
        let store = Self::new(db_path);
        store.with_conn("open", |_| Ok(()))?;
        Ok(store)
    }

    fn with_conn<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&Connection) -> DbResult<T>,
    ) -> RepoResult<T> {
        let started_at = Instant::now();
        let result = open_db(&self.db_path).and_then(|conn| run(&conn));
        match result {
            Ok(value) => Ok(value),
            Err(source) => {
                error!(
                    "event=memo_store module=repo status=error operation={} duration_ms={} error={}",
                    operation,
                    started_at.elapsed().as_millis(),
                    source
                );
                Err(RepoError::DataAccess { operation, source })
            }
        }
    }
}

impl MemoStore for SqliteMemoStore {
    fn create(&self, draft: &MemoDraft) -> RepoResult<Memo> {
        let memo = self.with_conn("create", |conn| {
            conn.execute(
                &format!(
                    "INSERT INTO memos (title, body, tags, created_at)
                     VALUES (?1, ?2, ?3, {NOW_SQL});"
                ),
                params![
                    draft.title.as_str(),
                    draft.body.as_str(),
                    join_tags(&draft.tags)
                ],
            )?;
            let id = conn.last_insert_rowid();
            let memo = conn.query_row(
                &format!("{MEMO_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_memo_row,
            )?;
            Ok(memo)
        })?;

        debug!(
            "event=memo_create module=repo status=ok memo_id={}",
            memo.id()
        );
        Ok(memo)
    }

    fn get(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.with_conn("get", |conn| {
            let memo = conn
                .query_row(
                    &format!("{MEMO_SELECT_SQL} WHERE id = ?1;"),
                    [id],
                    parse_memo_row,
                )
                .optional()?;
            Ok(memo)
        })
    }

    fn get_all(&self) -> RepoResult<Vec<Memo>> {
        self.with_conn("get_all", |conn| {
            query_memos(
                conn,
                &format!("{MEMO_SELECT_SQL} ORDER BY id ASC;"),
                params![],
            )
        })
    }

    fn update(&self, memo: &Memo) -> RepoResult<bool> {
        let changed = self.with_conn("update", |conn| {
            let changed = conn.execute(
                &format!(
                    "UPDATE memos
                     SET
                        title = ?1,
                        body = ?2,
                        tags = ?3,
                        updated_at = {NOW_SQL}
                     WHERE id = ?4;"
                ),
                params![memo.title(), memo.body(), join_tags(memo.tags()), memo.id()],
            )?;
            Ok(changed)
        })?;

        if changed == 0 {
            warn!(
                "event=memo_update module=repo status=miss memo_id={}",
                memo.id()
            );
            return Ok(false);
        }

        debug!(
            "event=memo_update module=repo status=ok memo_id={}",
            memo.id()
        );
        Ok(true)
    }

    fn delete_by_id(&self, id: MemoId) -> RepoResult<bool> {
        let removed = self.with_conn("delete", |conn| {
            let removed = conn.execute("DELETE FROM memos WHERE id = ?1;", [id])?;
            Ok(removed)
        })?;

        debug!(
            "event=memo_delete module=repo status={} memo_id={}",
            if removed > 0 { "ok" } else { "miss" },
            id
        );
        Ok(removed > 0)
    }

    fn find_by_keyword(&self, keyword: &str) -> RepoResult<Vec<Memo>> {
        if keyword.is_empty() {
            return Ok(Vec::new());
        }

        // instr() is a literal, case-sensitive substring test.
        self.with_conn("find_by_keyword", |conn| {
            query_memos(
                conn,
                &format!(
                    "{MEMO_SELECT_SQL}
                     WHERE instr(title, ?1) > 0
                        OR instr(body, ?1) > 0
                     ORDER BY id ASC;"
                ),
                [keyword],
            )
        })
    }

    fn find_by_tag(&self, tag: &str) -> RepoResult<Vec<Memo>> {
        if tag.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self.with_conn("find_by_tag", |conn| {
            query_memos(
                conn,
                &format!(
                    "{MEMO_SELECT_SQL}
                     WHERE instr(tags, ?1) > 0
                     ORDER BY id ASC;"
                ),
                [tag],
            )
        })?;

        Ok(candidates
            .into_iter()
            .filter(|memo| memo.has_tag(tag))
            .collect())
    }

    fn get_all_tags(&self) -> RepoResult<BTreeSet<String>> {
        self.with_conn("get_all_tags", |conn| {
            let mut stmt = conn.prepare("SELECT tags FROM memos WHERE tags <> '';")?;
            let mut rows = stmt.query(params![])?;
            let mut tags = BTreeSet::new();
            while let Some(row) = rows.next()? {
                let raw: String = row.get(0)?;
                tags.extend(parse_tags(&raw));
            }
            Ok(tags)
        })
    }
}

fn query_memos<P: Params>(conn: &Connection, sql: &str, params: P) -> DbResult<Vec<Memo>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut memos = Vec::new();
    while let Some(row) = rows.next()? {
        memos.push(parse_memo_row(row)?);
    }
    Ok(memos)
}

fn parse_memo_row(row: &Row<'_>) -> rusqlite::Result<Memo> {
    let tags: String = row.get("tags")?;
    Ok(Memo::from_persisted(
        row.get::<_, MemoId>("id")?,
        row.get::<_, String>("title")?,
        row.get::<_, String>("body")?,
        parse_tags(&tags),
        row.get::<_, String>("created_at")?,
        row.get::<_, Option<String>>("updated_at")?,
    ))
}
