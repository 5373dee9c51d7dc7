//! Core domain logic for hashmemo.
//! This crate is the single source of truth for memo invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::memo::{Memo, MemoDraft, MemoId, TimestampKind, TIMESTAMP_NOT_SET};
pub use model::tags::{join_tags, parse_tag_input, parse_tags};
pub use repo::memo_repo::{MemoStore, RepoError, RepoResult, SqliteMemoStore};
pub use search::filter::{filter_memos, TagFilter, SHOW_ALL_LABEL};
pub use service::memo_service::{memo_at, MemoService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
