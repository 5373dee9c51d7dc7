//! Tag codec for the persisted comma-joined form.
//!
//! # Responsibility
//! - Convert between a memo's tag list and the single `tags` column value.
//! - Parse free-form tag input typed by users (`#work, study`).
//!
//! # Invariants
//! - `parse_tags(&join_tags(tags))` equals `tags` trimmed with empties removed.
//! - An empty tag list persists as `""` and parses back to an empty list.

/// Separator used in the persisted `tags` column.
pub const TAG_SEPARATOR: char = ',';

/// Joins tags into the persisted column form.
pub fn join_tags(tags: &[String]) -> String {
    let mut joined = String::new();
    for (idx, tag) in tags.iter().enumerate() {
        if idx > 0 {
            joined.push(TAG_SEPARATOR);
        }
        joined.push_str(tag);
    }
    joined
}

/// Parses the persisted column form back into a tag list.
///
/// Tokens are trimmed and empty tokens are dropped. Order is preserved and
/// duplicates are kept.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATOR)
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses comma-separated user input into normalized tags.
///
/// Each token is trimmed, loses one leading `#`, and is trimmed again.
/// Tokens that end up empty (`""`, `"#"`) are dropped.
pub fn parse_tag_input(raw: &str) -> Vec<String> {
    raw.split(TAG_SEPARATOR)
        .filter_map(normalize_tag_input)
        .collect()
}

/// Normalizes one user-typed tag, returning `None` when nothing remains.
pub fn normalize_tag_input(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    let stripped = trimmed.strip_prefix('#').unwrap_or(trimmed).trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}
