//! In-memory search entry points.
//!
//! # Responsibility
//! - Combine keyword and tag predicates over already-loaded memos.
//! - Stay free of I/O so presentation layers can filter on every keystroke.

pub mod filter;
