//! Helpers over JSON object trees (`serde_json::Value`).
//!
//! Values are owned trees, so cyclic input cannot be expressed and recursion always terminates.

use serde_json::{Map, Value};

/// Returns a structurally equal copy that shares nothing with `value`.
pub fn deep_clone(value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.iter().map(deep_clone).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(key, field)| (key.clone(), deep_clone(field)))
                .collect(),
        ),
        scalar => scalar.clone(),
    }
}

/// Keeps only the listed top-level keys. Missing keys are skipped; non-objects yield `{}`.
pub fn pick<K: AsRef<str>>(value: &Value, keys: &[K]) -> Value {
    let Some(fields) = value.as_object() else {
        return Value::Object(Map::new());
    };
    let picked = keys
        .iter()
        .filter_map(|key| {
            let key = key.as_ref();
            fields.get(key).map(|field| (key.to_string(), field.clone()))
        })
        .collect();
    Value::Object(picked)
}

/// Drops the listed top-level keys. Non-objects yield `{}`.
pub fn omit<K: AsRef<str>>(value: &Value, keys: &[K]) -> Value {
    let Some(fields) = value.as_object() else {
        return Value::Object(Map::new());
    };
    let kept = fields
        .iter()
        .filter(|(key, _)| !keys.iter().any(|omitted| omitted.as_ref() == key.as_str()))
        .map(|(key, field)| (key.clone(), field.clone()))
        .collect();
    Value::Object(kept)
}

/// Recursively merges `source` into `target` and returns `target`.
///
/// Objects merge key by key; arrays and scalars in `source` replace the target value wholesale.
/// A non-object `target` is replaced by `source` when `source` is an object.
pub fn deep_merge(target: &mut Value, source: Value) -> &mut Value {
    match (&mut *target, source) {
        (Value::Object(target_fields), Value::Object(source_fields)) => {
            for (key, source_field) in source_fields {
                match target_fields.get_mut(&key) {
                    Some(existing) if existing.is_object() && source_field.is_object() => {
                        deep_merge(existing, source_field);
                    }
                    _ => {
                        target_fields.insert(key, source_field);
                    }
                }
            }
        }
        (slot, source) => *slot = source,
    }
    target
}

/// `null`, `""`, `[]` and `{}` are empty; numbers and booleans never are.
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn deep_clone_copies_every_level() {
        let original = json!({"a": {"b": 1}, "c": [1, 2], "when": "2024-01-01T00:00:00Z"});
        let cloned = deep_clone(&original);
        assert_eq!(cloned, original);

        let original_inner = original["a"].as_object().expect("object");
        let cloned_inner = cloned["a"].as_object().expect("object");
        assert!(!std::ptr::eq(original_inner, cloned_inner));
        let original_list = original["c"].as_array().expect("array");
        let cloned_list = cloned["c"].as_array().expect("array");
        assert!(!std::ptr::eq(original_list, cloned_list));
    }

    #[test]
    fn pick_and_omit_filter_top_level_keys() {
        let value = json!({"a": 1, "b": 2, "c": 3});
        assert_eq!(pick(&value, &["a", "c"]), json!({"a": 1, "c": 3}));
        assert_eq!(omit(&value, &["b"]), json!({"a": 1, "c": 3}));
        assert_eq!(pick(&value, &["missing"]), json!({}));
        assert_eq!(omit(&json!([1, 2]), &["0"]), json!({}));
    }

    #[test]
    fn deep_merge_merges_objects_and_replaces_the_rest() {
        let mut target = json!({"a": {"b": 1}});
        deep_merge(&mut target, json!({"a": {"c": 2}}));
        assert_eq!(target, json!({"a": {"b": 1, "c": 2}}));

        let mut target = json!({"list": [1, 2], "n": 1, "nested": {"x": {"y": 1}}});
        let merged = deep_merge(
            &mut target,
            json!({"list": [3], "n": {"now": "object"}, "nested": {"x": {"z": 2}}}),
        );
        assert_eq!(
            *merged,
            json!({"list": [3], "n": {"now": "object"}, "nested": {"x": {"y": 1, "z": 2}}})
        );
    }

    #[test]
    fn is_empty_matches_container_semantics() {
        assert!(is_empty(&json!({})));
        assert!(is_empty(&json!([])));
        assert!(is_empty(&json!("")));
        assert!(is_empty(&Value::Null));
        assert!(!is_empty(&json!({"a": 1})));
        assert!(!is_empty(&json!(0)));
        assert!(!is_empty(&json!(false)));
    }
}
