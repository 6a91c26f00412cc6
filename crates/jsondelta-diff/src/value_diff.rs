//! Value-level diff: the recursive delta between two JSON value trees.
//!
//! Rules are applied in order, the first match wins:
//!
//! 1. An absent operand yields the other operand unchanged.
//! 2. Operands of different kinds yield the compared value.
//! 3. Two objects are diffed entry by entry.
//! 4. Two arrays are rejected with [`DiffError::UnsupportedOperation`].
//! 5. Equal scalars yield an empty object; unequal scalars yield the
//!    compared value.
//!
//! Within an object, keys only in the compared side are copied whole, keys
//! only in the base side map to `null`, and keys on both sides are omitted
//! when deep-equal and diffed recursively otherwise.
//!
//! Removal and a change to `null` both produce `key: null`. The delta does
//! not tell them apart; use [`change_set`](crate::change_set()) when that
//! distinction matters.

use serde_json::{Map, Value};
use tracing::{debug, trace};

use jsondelta_types::{JsonPointer, ValueKind};

use crate::error::{DiffError, DiffResult};

/// Compute the delta from `base` to `compared`, where either side may be
/// absent.
///
/// Absence is not `null`: `diff(None, Some(&Value::Null))` is `Some(Null)`,
/// while `diff(Some(&Value::Null), Some(&Value::Null))` is `Some({})`.
/// Returns `None` only when both operands are absent.
pub fn diff(base: Option<&Value>, compared: Option<&Value>) -> DiffResult<Option<Value>> {
    match (base, compared) {
        (None, compared) => Ok(compared.cloned()),
        (Some(base), None) => Ok(Some(base.clone())),
        (Some(base), Some(compared)) => diff_values(base, compared).map(Some),
    }
}

/// Compute the delta from `base` to `compared`.
///
/// # Examples
///
/// ```
/// use jsondelta_diff::diff_values;
/// use serde_json::json;
///
/// let base = json!({"key0": "val", "key1": "abc", "key2": "xyz"});
/// let compared = json!({"key0": "val", "key1": "bcd", "key3": "123"});
///
/// let delta = diff_values(&base, &compared).unwrap();
/// assert_eq!(delta, json!({"key1": "bcd", "key2": null, "key3": "123"}));
/// ```
pub fn diff_values(base: &Value, compared: &Value) -> DiffResult<Value> {
    diff_at(base, compared, &mut JsonPointer::root())
}

fn diff_at(base: &Value, compared: &Value, path: &mut JsonPointer) -> DiffResult<Value> {
    match base {
        Value::Object(old) => match compared {
            Value::Object(new) => diff_entries(old, new, path).map(Value::Object),
            _ => Ok(kind_changed(base, compared, path)),
        },
        Value::Array(_) => match compared {
            Value::Array(_) => {
                debug!(path = %path, "rejecting array comparison");
                Err(DiffError::UnsupportedOperation { path: path.clone() })
            }
            _ => Ok(kind_changed(base, compared, path)),
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            if ValueKind::of(base) != ValueKind::of(compared) {
                Ok(kind_changed(base, compared, path))
            } else if base == compared {
                Ok(Value::Object(Map::new()))
            } else {
                Ok(compared.clone())
            }
        }
    }
}

fn kind_changed(base: &Value, compared: &Value, path: &JsonPointer) -> Value {
    trace!(
        path = %path,
        from = %ValueKind::of(base),
        to = %ValueKind::of(compared),
        "kind changed"
    );
    compared.clone()
}

fn diff_entries(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    path: &mut JsonPointer,
) -> DiffResult<Map<String, Value>> {
    let mut delta = Map::new();
    let (mut added, mut removed, mut changed) = (0usize, 0usize, 0usize);

    // Removed and changed keys.
    for (key, old_val) in old {
        match new.get(key) {
            Some(new_val) => {
                if old_val != new_val {
                    path.push(key.as_str());
                    let nested = diff_at(old_val, new_val, path)?;
                    path.pop();
                    delta.insert(key.clone(), nested);
                    changed += 1;
                }
            }
            None => {
                delta.insert(key.clone(), Value::Null);
                removed += 1;
            }
        }
    }

    // Added keys, copied whole.
    for (key, new_val) in new {
        if !old.contains_key(key) {
            delta.insert(key.clone(), new_val.clone());
            added += 1;
        }
    }

    trace!(path = %path, added, removed, changed, "object entries diffed");
    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn empty() -> Value {
        json!({})
    }

    #[test]
    fn no_differences_results_in_empty_object() {
        let base = json!({"key1": "value1", "key2": 42});
        let compared = json!({"key1": "value1", "key2": 42});

        assert_eq!(diff_values(&base, &compared).unwrap(), empty());
    }

    #[test]
    fn absent_operand_passes_other_through() {
        let data = json!({"key": "value"});

        assert_eq!(diff(Some(&data), None).unwrap(), Some(data.clone()));
        assert_eq!(diff(None, Some(&data)).unwrap(), Some(data.clone()));
        assert_eq!(diff(None, None).unwrap(), None);
    }

    #[test]
    fn absent_is_not_null() {
        assert_eq!(diff(None, Some(&Value::Null)).unwrap(), Some(Value::Null));
        assert_eq!(
            diff(Some(&Value::Null), Some(&Value::Null)).unwrap(),
            Some(empty())
        );
    }

    #[test]
    fn absent_operand_skips_array_check() {
        let list = json!([1, 2, 3]);
        assert_eq!(diff(Some(&list), None).unwrap(), Some(list.clone()));
    }

    #[test]
    fn kind_mismatch_returns_compared() {
        let base = json!({});
        let compared = json!("after");
        assert_eq!(diff_values(&base, &compared).unwrap(), compared);

        let base = json!({"a": 1});
        let compared = json!([1, 2]);
        assert_eq!(diff_values(&base, &compared).unwrap(), compared);

        let base = json!([1, 2]);
        let compared = json!({"a": 1});
        assert_eq!(diff_values(&base, &compared).unwrap(), compared);

        assert_eq!(diff_values(&json!(1), &json!("1")).unwrap(), json!("1"));
        assert_eq!(diff_values(&json!(null), &json!(false)).unwrap(), json!(false));
        assert_eq!(diff_values(&json!(true), &json!(null)).unwrap(), json!(null));
    }

    #[test]
    fn unequal_scalars_return_compared() {
        assert_eq!(diff_values(&json!("before"), &json!("after")).unwrap(), json!("after"));
        assert_eq!(diff_values(&json!(1), &json!(2)).unwrap(), json!(2));
        assert_eq!(diff_values(&json!(true), &json!(false)).unwrap(), json!(false));
    }

    #[test]
    fn equal_scalars_return_empty_object() {
        for v in [json!(null), json!(true), json!(7), json!(2.5), json!("same")] {
            assert_eq!(diff_values(&v, &v).unwrap(), empty());
        }
    }

    fn one_of_each_kind() -> Vec<Value> {
        vec![
            json!(null),
            json!(true),
            json!(3),
            json!("s"),
            json!({"k": 1}),
            json!([1]),
        ]
    }

    #[test]
    fn every_kind_pair_is_dispatched() {
        for base in one_of_each_kind() {
            for compared in one_of_each_kind() {
                let result = diff_values(&base, &compared);
                match (ValueKind::of(&base), ValueKind::of(&compared)) {
                    (ValueKind::Array, ValueKind::Array) => assert!(matches!(
                        result,
                        Err(DiffError::UnsupportedOperation { ref path }) if path.is_root()
                    )),
                    (from, to) if from == to => {
                        assert_eq!(result.unwrap(), empty(), "{from} vs {to}")
                    }
                    (from, to) => assert_eq!(result.unwrap(), compared, "{from} vs {to}"),
                }
            }
        }
    }

    #[test]
    fn integer_and_float_representations_differ() {
        assert_eq!(diff_values(&json!(1), &json!(1.0)).unwrap(), json!(1.0));
    }

    #[test]
    fn basic_value_changes() {
        let base = json!({"string": "x", "int": 42, "boolean": true});
        let compared = json!({"string": "y", "int": 43, "boolean": false});

        let delta = diff_values(&base, &compared).unwrap();
        assert_eq!(delta, json!({"string": "y", "int": 43, "boolean": false}));
    }

    #[test]
    fn added_entries() {
        let base = json!({"key1": "one"});
        let compared = json!({"key1": "one", "key2": "two"});

        assert_eq!(diff_values(&base, &compared).unwrap(), json!({"key2": "two"}));
    }

    #[test]
    fn removed_entries_map_to_null() {
        let base = json!({"key1": "one", "key2": "two"});
        let compared = json!({"key1": "one"});

        assert_eq!(diff_values(&base, &compared).unwrap(), json!({"key2": null}));
    }

    #[test]
    fn change_to_null_looks_like_removal() {
        let base = json!({"key1": "one", "key2": "two"});
        let compared = json!({"key1": "one", "key2": null});

        // Same delta as removing "key2".
        assert_eq!(diff_values(&base, &compared).unwrap(), json!({"key2": null}));
    }

    #[test]
    fn change_from_null() {
        let base = json!({"nullable": null});
        let compared = json!({"nullable": "not null"});

        assert_eq!(
            diff_values(&base, &compared).unwrap(),
            json!({"nullable": "not null"})
        );
    }

    #[test]
    fn removed_subtree_is_null_not_recursed() {
        let base = json!({"gone": {"deep": {"x": 1}}});
        let compared = json!({});

        assert_eq!(diff_values(&base, &compared).unwrap(), json!({"gone": null}));
    }

    #[test]
    fn added_subtree_is_copied_whole() {
        let base = json!({});
        let compared = json!({"new": {"list": [1, 2], "nested": {"x": null}}});

        assert_eq!(diff_values(&base, &compared).unwrap(), compared);
    }

    #[test]
    fn differences_in_subtree() {
        let base = json!({
            "key": "value",
            "subtree": {"same": "one", "changed": "two", "removed": "three"}
        });
        let compared = json!({
            "key": "value",
            "subtree": {"same": "one", "changed": "2", "added": "4"}
        });

        assert_eq!(
            diff_values(&base, &compared).unwrap(),
            json!({"subtree": {"changed": "2", "removed": null, "added": "4"}})
        );
    }

    #[test]
    fn nested_kind_change_replaces_subtree() {
        let base = json!({"config": {"port": 8080}});
        let compared = json!({"config": "disabled"});

        assert_eq!(
            diff_values(&base, &compared).unwrap(),
            json!({"config": "disabled"})
        );
    }

    #[test]
    fn top_level_arrays_rejected_regardless_of_contents() {
        for (a, b) in [
            (json!([]), json!([])),
            (json!([1, 2]), json!([1, 2])),
            (json!([1]), json!(["x", {"y": 2}])),
        ] {
            let err = diff_values(&a, &b).unwrap_err();
            match err {
                DiffError::UnsupportedOperation { path } => assert!(path.is_root()),
                other => panic!("expected UnsupportedOperation, got {other:?}"),
            }
        }
    }

    #[test]
    fn nested_unequal_arrays_rejected_with_path() {
        let base = json!({"outer": {"tags": ["a"]}});
        let compared = json!({"outer": {"tags": ["a", "b"]}});

        let err = diff_values(&base, &compared).unwrap_err();
        match &err {
            DiffError::UnsupportedOperation { path } => {
                assert_eq!(path.to_string(), "/outer/tags");
            }
            other => panic!("expected UnsupportedOperation, got {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "unsupported operation: JSON arrays not supported (at '/outer/tags')"
        );
    }

    #[test]
    fn nested_equal_arrays_are_omitted() {
        let base = json!({"tags": ["a", "b"], "n": 1});
        let compared = json!({"tags": ["a", "b"], "n": 2});

        assert_eq!(diff_values(&base, &compared).unwrap(), json!({"n": 2}));
    }

    #[test]
    fn added_and_removed_arrays_are_not_compared() {
        let base = json!({"old": [1]});
        let compared = json!({"new": [2]});

        assert_eq!(
            diff_values(&base, &compared).unwrap(),
            json!({"old": null, "new": [2]})
        );
    }

    #[test]
    fn inputs_are_not_modified() {
        let base = json!({"a": {"b": 1}, "c": 2});
        let compared = json!({"a": {"b": 2}, "d": 3});
        let (base_before, compared_before) = (base.clone(), compared.clone());

        let first = diff_values(&base, &compared).unwrap();
        let second = diff_values(&base, &compared).unwrap();

        assert_eq!(base, base_before);
        assert_eq!(compared, compared_before);
        assert_eq!(first, second);
    }
}
