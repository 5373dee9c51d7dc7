//! Memo use-case service.
//!
//! # Responsibility
//! - Give presentation layers one injected handle for memo use-cases.
//! - Combine store reads with the in-memory filter for live search.
//!
//! # Invariants
//! - The service never bypasses the store; it holds no memo state itself.
//! - Store failures are returned unchanged; nothing is retried.

use crate::model::memo::{Memo, MemoDraft, MemoId};
use crate::repo::memo_repo::{MemoStore, RepoResult};
use crate::search::filter::{filter_memos, TagFilter};
use std::collections::BTreeSet;

/// Memo service facade over a store implementation.
pub struct MemoService<S: MemoStore> {
    store: S,
}

impl<S: MemoStore> MemoService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persists a new memo.
    pub fn add(&self, draft: &MemoDraft) -> RepoResult<Memo> {
        self.store.create(draft)
    }

    /// Lists all memos in store order.
    pub fn list(&self) -> RepoResult<Vec<Memo>> {
        self.store.get_all()
    }

    pub fn get(&self, id: MemoId) -> RepoResult<Option<Memo>> {
        self.store.get(id)
    }

    /// Saves edits to an existing memo.
    ///
    /// Returns `false` when the memo no longer exists; the store logs the miss.
    pub fn update(&self, memo: &Memo) -> RepoResult<bool> {
        self.store.update(memo)
    }

    pub fn delete(&self, memo: &Memo) -> RepoResult<bool> {
        self.store.delete(memo)
    }

    /// Case-sensitive keyword lookup against title and body.
    pub fn search(&self, keyword: &str) -> RepoResult<Vec<Memo>> {
        self.store.find_by_keyword(keyword)
    }

    /// Exact tag lookup.
    pub fn search_by_tag(&self, tag: &str) -> RepoResult<Vec<Memo>> {
        self.store.find_by_tag(tag)
    }

    pub fn all_tags(&self) -> RepoResult<BTreeSet<String>> {
        self.store.get_all_tags()
    }

    /// Loads every memo and applies the case-insensitive keyword + tag filter.
    pub fn filter(&self, keyword: &str, tag: &TagFilter) -> RepoResult<Vec<Memo>> {
        let all = self.store.get_all()?;
        Ok(filter_memos(&all, keyword, tag))
    }

    /// Tag picker entries: `TagFilter::All` followed by one entry per sorted
    /// tag.
    ///
    /// Pickers select by position, so a tag spelled like the `show all` label
    /// still yields `TagFilter::Tag`.
    pub fn tag_choices(&self) -> RepoResult<Vec<TagFilter>> {
        let tags = self.store.get_all_tags()?;
        let mut choices = Vec::with_capacity(tags.len() + 1);
        choices.push(TagFilter::All);
        choices.extend(tags.into_iter().map(TagFilter::Tag));
        Ok(choices)
    }
}

/// Looks up a memo by the 1-based number shown next to it in a list.
pub fn memo_at(memos: &[Memo], number: usize) -> Option<&Memo> {
    number.checked_sub(1).and_then(|index| memos.get(index))
}
