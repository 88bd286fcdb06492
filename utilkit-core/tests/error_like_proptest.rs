//! Property-based tests for error normalization

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use utilkit_core::error_like::{as_error_like, is_error_like, UNDEFINED_ERROR, UNKNOWN_ERROR};

// Strategy for arbitrary JSON scalars
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        ".{0,12}".prop_map(Value::String),
    ]
}

// Strategy for nested JSON values
fn value_strategy() -> impl Strategy<Value = Value> {
    scalar_strategy().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

// Strategy for objects carrying a non-empty message plus arbitrary extras
fn error_object_strategy() -> impl Strategy<Value = Value> {
    (
        ".{1,20}",
        prop::option::of("[A-Z_]{1,8}"),
        prop::option::of(100u16..600),
        prop::collection::btree_map("x[a-z]{1,5}", value_strategy(), 0..3),
    )
        .prop_map(|(message, code, status, extras)| {
            let mut object: Map<String, Value> = extras.into_iter().collect();
            object.insert("message".to_string(), Value::String(message));
            if let Some(code) = code {
                object.insert("code".to_string(), Value::String(code));
            }
            if let Some(status) = status {
                object.insert("statusCode".to_string(), json!(status));
            }
            Value::Object(object)
        })
}

proptest! {
    #[test]
    fn error_objects_are_returned_unchanged(raw in error_object_strategy()) {
        prop_assert!(is_error_like(&raw));
        let like = as_error_like(&raw);
        prop_assert_eq!(like.to_value(), raw.clone());
        prop_assert_eq!(like.message.as_deref(), raw["message"].as_str());
    }

    #[test]
    fn non_empty_strings_become_the_message(text in ".{1,40}") {
        let like = as_error_like(&Value::String(text.clone()));
        prop_assert_eq!(like.message, Some(text));
    }

    #[test]
    fn non_zero_numbers_become_the_message(n in any::<i64>().prop_filter("non-zero", |n| *n != 0)) {
        let like = as_error_like(&json!(n));
        prop_assert_eq!(like.message, Some(n.to_string()));
    }

    #[test]
    fn normalization_always_yields_a_message(value in value_strategy()) {
        let like = as_error_like(&value);
        if !is_error_like(&value) {
            let message = like.message.clone().unwrap_or_default();
            prop_assert!(!message.is_empty());
        }
        prop_assert!(!like.message_or_default().is_empty() || is_error_like(&value));
    }
}

#[test]
fn null_is_an_undefined_error() {
    assert_eq!(as_error_like(&Value::Null).message.as_deref(), Some(UNDEFINED_ERROR));
}

#[test]
fn empty_message_alone_is_not_error_like() {
    let raw = json!({ "message": "" });
    assert!(!is_error_like(&raw));
    assert_eq!(as_error_like(&raw).message.as_deref(), Some(r#"{"message":""}"#));
}

#[test]
fn empty_textual_form_is_unknown_error() {
    assert_eq!(as_error_like(&json!([null])).message.as_deref(), Some(UNKNOWN_ERROR));
}
