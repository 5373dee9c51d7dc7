//! Keyword + tag filter over in-memory memos.
//!
//! # Invariants
//! - Keyword and tag comparisons are case-insensitive.
//! - Output keeps input order and is a subset of the input.
//! - Filtering is pure: identical inputs give identical outputs.

use crate::model::memo::Memo;

/// Label shown to users for "no tag filter".
pub const SHOW_ALL_LABEL: &str = "show all";

/// Tag dimension of a filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TagFilter {
    /// Matches every memo.
    #[default]
    All,
    /// Matches memos carrying this tag, compared case-insensitively.
    Tag(String),
}

impl TagFilter {
    /// Maps a tag picker selection to a filter.
    ///
    /// Blank input and the `show all` label (any case) mean no tag filter.
    pub fn from_selection(selection: &str) -> Self {
        let trimmed = selection.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(SHOW_ALL_LABEL) {
            Self::All
        } else {
            Self::Tag(trimmed.to_string())
        }
    }

    /// Label to show in a tag picker.
    pub fn label(&self) -> &str {
        match self {
            Self::All => SHOW_ALL_LABEL,
            Self::Tag(tag) => tag,
        }
    }

    fn matches(&self, memo: &Memo) -> bool {
        match self {
            Self::All => true,
            Self::Tag(wanted) => {
                let wanted = wanted.to_lowercase();
                memo.tags().iter().any(|tag| tag.to_lowercase() == wanted)
            }
        }
    }
}

/// Returns memos matching both the keyword and the tag filter.
///
/// `keyword` is trimmed and lower-cased; an empty keyword matches everything.
pub fn filter_memos(all: &[Memo], keyword: &str, tag: &TagFilter) -> Vec<Memo> {
    let needle = keyword.trim().to_lowercase();
    all.iter()
        .filter(|memo| matches_keyword(memo, &needle) && tag.matches(memo))
        .cloned()
        .collect()
}

fn matches_keyword(memo: &Memo, needle: &str) -> bool {
    needle.is_empty()
        || memo.title().to_lowercase().contains(needle)
        || memo.body().to_lowercase().contains(needle)
}
