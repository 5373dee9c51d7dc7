//! Memo domain model.
//!
//! # Responsibility
//! - Define the in-memory shapes exchanged between store and presentation.
//! - Own the tag persisted-form codec and user-input tag parsing.
//!
//! # Invariants
//! - A persisted memo is always identified by a store-assigned `MemoId`.
//! - Deletion is final; there is no tombstone state.

pub mod memo;
pub mod tags;
