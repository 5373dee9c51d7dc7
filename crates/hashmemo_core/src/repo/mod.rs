//! Repository layer contracts and persistence implementations.
//!
//! # Responsibility
//! - Define the memo store contract used by services and presentation.
//! - Isolate SQLite query details from the rest of the crate.
//!
//! # Invariants
//! - Store APIs raise only data-access errors; "no such row" is a value.

pub mod memo_repo;
