use super::{reconcile, resolve, ListShape, PathExpr};
use crate::error::Error;
use serde_json::{json, Value};
use std::path::Path;

fn strings(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect()
}

#[test]
fn test_parse_full_shape() {
    let expr = PathExpr::parse("concat.app.src");
    assert_eq!(expr.dotted, "concat.app.src");
    assert_eq!(expr.shape, ListShape::Full);
    assert_eq!(expr.compact_dest(), None);
}

#[test]
fn test_parse_compact_shape() {
    let expr = PathExpr::parse("concat.app[files][js/all.js]");
    assert_eq!(expr.dotted, "concat.app");
    assert_eq!(
        expr.shape,
        ListShape::Compact {
            sub_keys: vec!["files".to_string(), "js/all.js".to_string()]
        }
    );
    assert_eq!(expr.compact_dest(), Some("js/all.js"));
}

#[test]
fn test_resolve_walks_to_leaf() {
    let mut tree = json!({"concat": {"app": {"src": ["a.js"]}}});
    let (container, leaf) = resolve(&mut tree, "concat.app.src").unwrap();
    assert_eq!(leaf, "src");
    assert!(container.get("src").is_some());
}

#[test]
fn test_resolve_missing_intermediate_is_fatal() {
    let mut tree = json!({"concat": {}});
    let err = resolve(&mut tree, "concat.app.src").unwrap_err();
    match err {
        Error::UnresolvedTaskPath { path, segment } => {
            assert_eq!(path, "concat.app.src");
            assert_eq!(segment, "app");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_union_preserves_existing_order_and_appends() {
    let mut tree = json!({"concat": {"app": {"src": ["a.js", "b.js"]}}});
    let expr = PathExpr::parse("concat.app.src");
    let found = vec!["b.js".to_string(), "c.js".to_string()];

    reconcile(&mut tree, &expr, Path::new(""), &found).unwrap();
    assert_eq!(strings(&tree["concat"]["app"]["src"]), ["a.js", "b.js", "c.js"]);
}

#[test]
fn test_reconcile_is_idempotent() {
    let mut tree = json!({"concat": {"app": {"src": []}}});
    let expr = PathExpr::parse("concat.app.src");
    let found = vec!["a.js".to_string(), "b.js".to_string()];

    reconcile(&mut tree, &expr, Path::new(""), &found).unwrap();
    reconcile(&mut tree, &expr, Path::new(""), &found).unwrap();
    assert_eq!(strings(&tree["concat"]["app"]["src"]), ["a.js", "b.js"]);
}

#[test]
fn test_stale_entries_are_never_pruned() {
    // Additive-only: nothing is removed even when no longer declared
    let mut tree = json!({"concat": {"app": {"src": ["old.js"]}}});
    let expr = PathExpr::parse("concat.app.src");

    reconcile(&mut tree, &expr, Path::new(""), &["new.js".to_string()]).unwrap();
    assert_eq!(strings(&tree["concat"]["app"]["src"]), ["old.js", "new.js"]);
}

#[test]
fn test_full_shape_creates_missing_list_slot() {
    let mut tree = json!({"concat": {"app": {}}});
    let expr = PathExpr::parse("concat.app.src");

    reconcile(&mut tree, &expr, Path::new(""), &["a.js".to_string()]).unwrap();
    assert_eq!(strings(&tree["concat"]["app"]["src"]), ["a.js"]);
}

#[test]
fn test_compact_shape_creates_missing_destination_key() {
    let mut tree = json!({"concat": {"app": {"files": {}}}});
    let expr = PathExpr::parse("concat.app[files][js/all.js]");

    reconcile(&mut tree, &expr, Path::new(""), &["a.js".to_string()]).unwrap();
    assert_eq!(strings(&tree["concat"]["app"]["files"]["js/all.js"]), ["a.js"]);
}

#[test]
fn test_compact_missing_sub_key_is_fatal() {
    let mut tree = json!({"concat": {"app": {}}});
    let expr = PathExpr::parse("concat.app[files][js/all.js]");
    let err = reconcile(&mut tree, &expr, Path::new(""), &[]).unwrap_err();
    assert!(matches!(err, Error::UnresolvedTaskPath { .. }), "{err}");
}

#[test]
fn test_new_entries_are_root_prefixed() {
    let mut tree = json!({"concat": {"app": {"src": []}}});
    let expr = PathExpr::parse("concat.app.src");

    reconcile(&mut tree, &expr, Path::new("site"), &["js/a.js".to_string()]).unwrap();
    assert_eq!(strings(&tree["concat"]["app"]["src"]), ["site/js/a.js"]);
}

#[test]
fn test_non_array_list_slot_is_malformed() {
    let mut tree = json!({"concat": {"app": {"src": "not a list"}}});
    let expr = PathExpr::parse("concat.app.src");
    let err = reconcile(&mut tree, &expr, Path::new(""), &[]).unwrap_err();
    assert!(matches!(err, Error::MalformedTaskTree { .. }), "{err}");
}
