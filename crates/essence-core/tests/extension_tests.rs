mod common;

use common::{insert_alpha, insert_extension, insert_group, new_store};
use essence_core::{effective_attributes, EssenceError};
use serde_json::json;

// ===== SPEC SCENARIO: APPEND "[beta]" THROUGH THE ASSOCIATED GROUP =====

#[test]
fn test_extension_applies_only_through_its_group() {
    let mut store = new_store();
    insert_group(&mut store, "ctx", &["e"], &[]);
    insert_group(&mut store, "unrelated", &[], &[]);
    insert_alpha(&mut store, "e", "Element", Some("ctx"));
    insert_extension(&mut store, "x", "ctx", "e", "description", "append \" [beta]\"");

    let through_ctx = effective_attributes(&store, "e", "ctx").unwrap();
    assert_eq!(
        through_ctx.get("description"),
        Some(&json!("Element description [beta]"))
    );

    let through_unrelated = effective_attributes(&store, "e", "unrelated").unwrap();
    assert_eq!(
        through_unrelated.get("description"),
        Some(&json!("Element description"))
    );
}

#[test]
fn test_extensions_from_referred_groups_are_active() {
    // Viewing through "method", which refers to "practice": the practice's
    // extension participates.
    let mut store = new_store();
    insert_group(&mut store, "method", &[], &["practice"]);
    insert_group(&mut store, "practice", &["e"], &[]);
    insert_alpha(&mut store, "e", "Element", Some("practice"));
    insert_extension(
        &mut store,
        "x",
        "practice",
        "e",
        "description",
        "prepend \"Adopted: \"",
    );

    let attrs = effective_attributes(&store, "e", "method").unwrap();
    assert_eq!(
        attrs.get("description"),
        Some(&json!("Adopted: Element description"))
    );
}

#[test]
fn test_stacking_order_is_closure_then_declaration() {
    // The viewing group's own extensions run before those contributed by
    // referred groups; within one group, declaration order holds.
    let mut store = new_store();
    insert_group(&mut store, "method", &[], &["practice"]);
    insert_group(&mut store, "practice", &["e"], &[]);
    insert_alpha(&mut store, "e", "Element", Some("practice"));
    insert_extension(&mut store, "x1", "method", "e", "description", "set \"base\"");
    insert_extension(&mut store, "x2", "method", "e", "description", "append \"+m\"");
    insert_extension(&mut store, "x3", "practice", "e", "description", "append \"+p\"");

    let attrs = effective_attributes(&store, "e", "method").unwrap();
    assert_eq!(attrs.get("description"), Some(&json!("base+m+p")));
}

// ===== ERROR BEHAVIOR =====

#[test]
fn test_malformed_function_names_extension_and_target() {
    let mut store = new_store();
    insert_group(&mut store, "ctx", &["e"], &[]);
    insert_alpha(&mut store, "e", "Element", Some("ctx"));
    insert_extension(&mut store, "bad", "ctx", "e", "description", "frobnicate");

    match effective_attributes(&store, "e", "ctx") {
        Err(EssenceError::ExtensionEvaluationError {
            extension_id,
            target_id,
            reason,
        }) => {
            assert_eq!(extension_id, "bad");
            assert_eq!(target_id, "e");
            assert!(!reason.is_empty());
        }
        other => panic!("expected ExtensionEvaluationError, got {:?}", other),
    }
}

#[test]
fn test_failed_call_leaves_raw_value_usable_as_fallback() {
    let mut store = new_store();
    insert_group(&mut store, "ctx", &["e"], &[]);
    insert_alpha(&mut store, "e", "Element", Some("ctx"));
    insert_extension(&mut store, "bad", "ctx", "e", "description", "frobnicate");

    assert!(effective_attributes(&store, "e", "ctx").is_err());

    // The degraded fallback is the element's raw attribute set.
    let raw = store.get("e").unwrap().attributes.clone();
    assert_eq!(raw.get("description"), Some(&json!("Element description")));
}

#[test]
fn test_type_mismatch_fails_whole_call() {
    let mut store = new_store();
    insert_group(&mut store, "ctx", &["e"], &[]);
    insert_alpha(&mut store, "e", "Element", Some("ctx"));
    store
        .get_mut("e")
        .unwrap()
        .attributes
        .set("priority".to_string(), json!(3));
    insert_extension(&mut store, "x", "ctx", "e", "priority", "append \"!\"");

    assert!(matches!(
        effective_attributes(&store, "e", "ctx"),
        Err(EssenceError::ExtensionEvaluationError { .. })
    ));
}

// ===== DETERMINISM =====

#[test]
fn test_effective_attributes_deterministic() {
    let mut store = new_store();
    insert_group(&mut store, "ctx", &["e"], &[]);
    insert_alpha(&mut store, "e", "Element", Some("ctx"));
    insert_extension(&mut store, "x1", "ctx", "e", "description", "append \" [a]\"");
    insert_extension(&mut store, "x2", "ctx", "e", "description", "append \" [b]\"");

    let first = effective_attributes(&store, "e", "ctx").unwrap();
    let second = effective_attributes(&store, "e", "ctx").unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.get("description"),
        Some(&json!("Element description [a] [b]"))
    );
}
