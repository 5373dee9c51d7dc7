//! Memo domain model.
//!
//! # Responsibility
//! - Carry memo field values between the store and presentation layers.
//! - Keep store-owned fields (`id`, timestamps) read-only for callers.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes afterwards.
//! - `created_at` is set once at insert time.
//! - `updated_at` is `None` until the first successful update.

use serde::{Deserialize, Serialize};

/// Store-assigned memo identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemoId = i64;

/// Display value for timestamps that were never set.
pub const TIMESTAMP_NOT_SET: &str = "(not set)";

/// Which timestamp a list or detail view shows for a memo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampKind {
    Created,
    Updated,
}

impl TimestampKind {
    /// Capitalized view label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Updated => "Updated",
        }
    }
}

/// Transient memo value that has not been persisted yet.
///
/// Presentation layers build drafts and hand them to `MemoStore::create`,
/// which assigns identity and `created_at`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoDraft {
    pub title: String,
    pub body: String,
    /// Tags already normalized by the caller (see `parse_tag_input`).
    pub tags: Vec<String>,
}

impl MemoDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            tags,
        }
    }
}

/// Persisted memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memo {
    id: MemoId,
    title: String,
    body: String,
    tags: Vec<String>,
    created_at: String,
    updated_at: Option<String>,
}

impl Memo {
    /// Rebuilds a memo from persisted column values.
    ///
    /// Intended for `MemoStore` implementations; callers should obtain memos
    /// from a store instead of fabricating ids.
    pub fn from_persisted(
        id: MemoId,
        title: impl Into<String>,
        body: impl Into<String>,
        tags: Vec<String>,
        created_at: impl Into<String>,
        updated_at: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            tags,
            created_at: created_at.into(),
            updated_at,
        }
    }

    pub fn id(&self) -> MemoId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn updated_at(&self) -> Option<&str> {
        self.updated_at.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Replaces the whole tag list.
    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
    }

    /// Returns whether the memo carries `tag` exactly (case-sensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|value| value == tag)
    }

    /// Returns `created_at` or the not-set sentinel when it is blank.
    pub fn created_at_display(&self) -> &str {
        if self.created_at.is_empty() {
            TIMESTAMP_NOT_SET
        } else {
            &self.created_at
        }
    }

    /// Returns `updated_at` or the not-set sentinel.
    pub fn updated_at_display(&self) -> &str {
        self.updated_at.as_deref().unwrap_or(TIMESTAMP_NOT_SET)
    }

    /// Picks the timestamp shown in list/detail views.
    ///
    /// Returns `Updated` only when an update happened and differs from
    /// creation time, otherwise `Created`.
    pub fn display_timestamp(&self) -> (TimestampKind, &str) {
        match self.updated_at.as_deref() {
            Some(updated) if updated != self.created_at => (TimestampKind::Updated, updated),
            _ => (TimestampKind::Created, self.created_at_display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Memo, MemoDraft, TimestampKind, TIMESTAMP_NOT_SET};

    fn sample() -> Memo {
        Memo::from_persisted(
            7,
            "title",
            "body",
            vec!["work".to_string()],
            "2026-01-02 03:04:05.000",
            None,
        )
    }

    #[test]
    fn unset_updated_at_displays_sentinel() {
        let memo = sample();
        assert_eq!(memo.updated_at(), None);
        assert_eq!(memo.updated_at_display(), TIMESTAMP_NOT_SET);
        assert_eq!(
            memo.display_timestamp(),
            (TimestampKind::Created, "2026-01-02 03:04:05.000")
        );
    }

    #[test]
    fn display_timestamp_prefers_distinct_update_time() {
        let updated = Memo::from_persisted(
            1,
            "t",
            "",
            Vec::new(),
            "2026-01-02 03:04:05.000",
            Some("2026-01-03 00:00:00.000".to_string()),
        );
        assert_eq!(
            updated.display_timestamp(),
            (TimestampKind::Updated, "2026-01-03 00:00:00.000")
        );

        let same = Memo::from_persisted(
            1,
            "t",
            "",
            Vec::new(),
            "2026-01-02 03:04:05.000",
            Some("2026-01-02 03:04:05.000".to_string()),
        );
        assert_eq!(same.display_timestamp().0, TimestampKind::Created);
        assert_eq!(TimestampKind::Updated.label(), "Updated");
    }

    #[test]
    fn setters_replace_values_without_touching_identity() {
        let mut memo = sample();
        let mut tags = vec!["a".to_string()];
        memo.set_title("new");
        memo.set_body("line1\nline2");
        memo.set_tags(tags.clone());
        tags.push("b".to_string());

        assert_eq!(memo.id(), 7);
        assert_eq!(memo.title(), "new");
        assert_eq!(memo.body(), "line1\nline2");
        assert_eq!(memo.tags(), ["a".to_string()]);
        assert!(memo.has_tag("a"));
        assert!(!memo.has_tag("A"));
    }

    #[test]
    fn draft_defaults_are_empty() {
        let draft = MemoDraft::default();
        assert!(draft.title.is_empty());
        assert!(draft.tags.is_empty());
    }
}
