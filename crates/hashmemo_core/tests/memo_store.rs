use hashmemo_core::{
    Memo, MemoDraft, MemoStore, RepoError, SqliteMemoStore, TIMESTAMP_NOT_SET,
};
use rusqlite::Connection;
use std::error::Error;
use tempfile::TempDir;

fn temp_store() -> (TempDir, SqliteMemoStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteMemoStore::open(dir.path().join("memos.db")).unwrap();
    (dir, store)
}

fn draft(title: &str, body: &str, tags: &[&str]) -> MemoDraft {
    MemoDraft::new(
        title,
        body,
        tags.iter().map(|tag| tag.to_string()).collect(),
    )
}

fn ids(memos: &[Memo]) -> Vec<i64> {
    memos.iter().map(Memo::id).collect()
}

#[test]
fn create_assigns_id_and_created_at_and_leaves_updated_at_unset() {
    let (_dir, store) = temp_store();

    let memo = store
        .create(&draft("first", "line1\nline2", &["work", "study"]))
        .unwrap();

    assert!(memo.id() > 0);
    assert_eq!(memo.title(), "first");
    assert_eq!(memo.body(), "line1\nline2");
    assert_eq!(memo.tags(), ["work".to_string(), "study".to_string()]);
    assert!(!memo.created_at().is_empty());
    assert_eq!(memo.updated_at(), None);
    assert_eq!(memo.updated_at_display(), TIMESTAMP_NOT_SET);

    let loaded = store.get(memo.id()).unwrap().unwrap();
    assert_eq!(loaded, memo);
}

#[test]
fn get_all_is_empty_for_new_store_and_keeps_insertion_order() {
    let (_dir, store) = temp_store();
    assert!(store.get_all().unwrap().is_empty());

    let a = store.create(&draft("a", "", &[])).unwrap();
    let b = store.create(&draft("b", "", &[])).unwrap();
    let c = store.create(&draft("c", "", &[])).unwrap();

    assert_eq!(
        ids(&store.get_all().unwrap()),
        vec![a.id(), b.id(), c.id()]
    );
}

#[test]
fn memo_without_tags_persists_empty_tag_string() {
    let (dir, store) = temp_store();
    let memo = store.create(&draft("untagged", "", &[])).unwrap();
    assert!(memo.tags().is_empty());

    let conn = Connection::open(dir.path().join("memos.db")).unwrap();
    let raw: String = conn
        .query_row("SELECT tags FROM memos WHERE id = ?1;", [memo.id()], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(raw, "");
}

#[test]
fn update_overwrites_fields_and_stamps_updated_at_only() {
    let (_dir, store) = temp_store();
    let created = store.create(&draft("draft", "old", &["a"])).unwrap();

    let mut edited = created.clone();
    edited.set_title("final");
    edited.set_body("new body");
    edited.set_tags(vec!["b".to_string(), "c".to_string()]);
    assert!(store.update(&edited).unwrap());

    let loaded = store.get(created.id()).unwrap().unwrap();
    assert_eq!(loaded.title(), "final");
    assert_eq!(loaded.body(), "new body");
    assert_eq!(loaded.tags(), ["b".to_string(), "c".to_string()]);
    assert_eq!(loaded.created_at(), created.created_at());
    let updated_at = loaded.updated_at().expect("updated_at should be set");
    assert!(updated_at >= loaded.created_at());
}

#[test]
fn update_with_unknown_id_is_a_reported_no_op() {
    let (_dir, store) = temp_store();
    store.create(&draft("only", "", &[])).unwrap();

    let ghost = Memo::from_persisted(-1, "ghost", "", Vec::new(), "", None);
    assert!(!store.update(&ghost).unwrap());
    assert_eq!(store.get_all().unwrap().len(), 1);
}

#[test]
fn delete_returns_true_once_then_false() {
    let (_dir, store) = temp_store();
    let memo = store.create(&draft("gone", "", &[])).unwrap();

    assert!(store.delete(&memo).unwrap());
    assert!(!store.delete(&memo).unwrap());
    assert!(!store.delete_by_id(memo.id()).unwrap());
    assert!(store.get(memo.id()).unwrap().is_none());
}

#[test]
fn ids_are_not_reused_after_delete() {
    let (_dir, store) = temp_store();
    let first = store.create(&draft("one", "", &[])).unwrap();
    store.delete(&first).unwrap();

    let second = store.create(&draft("two", "", &[])).unwrap();
    assert!(second.id() > first.id());
}

#[test]
fn find_by_keyword_matches_title_or_body_case_sensitively() {
    let (_dir, store) = temp_store();
    let title_hit = store.create(&draft("Project X", "", &[])).unwrap();
    let body_hit = store
        .create(&draft("Other", "the Project plan", &[]))
        .unwrap();
    store.create(&draft("project lower", "", &[])).unwrap();

    let result = store.find_by_keyword("Project").unwrap();
    assert_eq!(ids(&result), vec![title_hit.id(), body_hit.id()]);
    assert!(store.find_by_keyword("").unwrap().is_empty());
}

#[test]
fn find_by_keyword_treats_like_wildcards_literally() {
    let (_dir, store) = temp_store();
    let percent = store.create(&draft("50% off", "", &[])).unwrap();
    store.create(&draft("plain", "", &[])).unwrap();
    let underscore = store.create(&draft("snake_case", "", &[])).unwrap();

    assert_eq!(ids(&store.find_by_keyword("%").unwrap()), vec![percent.id()]);
    assert_eq!(
        ids(&store.find_by_keyword("_").unwrap()),
        vec![underscore.id()]
    );
}

#[test]
fn find_by_tag_requires_exact_element_match() {
    let (_dir, store) = temp_store();
    store.create(&draft("cart memo", "", &["cart"])).unwrap();
    let art = store.create(&draft("art memo", "", &["art"])).unwrap();
    store.create(&draft("upper", "", &["Art"])).unwrap();

    assert_eq!(ids(&store.find_by_tag("art").unwrap()), vec![art.id()]);
    assert!(store.find_by_tag("ar").unwrap().is_empty());
    assert!(store.find_by_tag("").unwrap().is_empty());
}

#[test]
fn get_all_tags_is_sorted_and_distinct() {
    let (_dir, store) = temp_store();
    store.create(&draft("one", "", &["b", "a"])).unwrap();
    store.create(&draft("two", "", &["a", "c"])).unwrap();
    store.create(&draft("three", "", &[])).unwrap();

    let tags: Vec<String> = store.get_all_tags().unwrap().into_iter().collect();
    assert_eq!(tags, vec!["a", "b", "c"]);
}

#[test]
fn unreachable_database_surfaces_data_access_error() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteMemoStore::new(dir.path().join("missing").join("memos.db"));

    let err = store.get_all().unwrap_err();
    assert!(matches!(err, RepoError::DataAccess { .. }));
    assert_eq!(err.operation(), "get_all");
    assert!(err.source().is_some());

    let open_err = SqliteMemoStore::open(dir.path().join("missing").join("memos.db"))
        .unwrap_err();
    assert_eq!(open_err.operation(), "open");
}

#[test]
fn memo_serializes_with_optional_updated_at() {
    let (_dir, store) = temp_store();
    let memo = store.create(&draft("json", "body", &["x"])).unwrap();

    let value = serde_json::to_value(&memo).unwrap();
    assert_eq!(value["title"], "json");
    assert_eq!(value["tags"], serde_json::json!(["x"]));
    assert!(value["updated_at"].is_null());
}
