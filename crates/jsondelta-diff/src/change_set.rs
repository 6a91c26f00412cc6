//! Change sets: a flattened, path-addressed view of a delta.
//!
//! A delta writes both "removed" and "changed to `null`" as `key: null`.
//! A [`ChangeSet`] keeps the two apart by listing every leaf difference
//! with its [`JsonPointer`] and the values on both sides. It follows the
//! same rules as [`diff_values`](crate::diff_values), including the refusal
//! to compare arrays, and [`ChangeSet::to_delta`] reproduces that delta.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

use jsondelta_types::{JsonPointer, ValueKind};

use crate::error::{DiffError, DiffResult};

/// The differences between two value trees, ordered by path.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    /// The list of changes.
    pub changes: Vec<Change>,
}

impl ChangeSet {
    /// Create an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if there are no changes.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes.
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    /// Number of added keys.
    pub fn additions(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Added { .. }))
            .count()
    }

    /// Number of removed keys.
    pub fn removals(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Removed { .. }))
            .count()
    }

    /// Number of modified values.
    pub fn modifications(&self) -> usize {
        self.changes
            .iter()
            .filter(|c| matches!(c, Change::Modified { .. }))
            .count()
    }

    /// The path of every change, in order.
    pub fn paths(&self) -> impl Iterator<Item = &JsonPointer> {
        self.changes.iter().map(Change::path)
    }

    /// The change at `path`, if any.
    ///
    /// Does not rely on ordering, so sets built by hand or deserialized
    /// work too.
    pub fn get(&self, path: &JsonPointer) -> Option<&Change> {
        self.changes.iter().find(|c| c.path() == path)
    }

    /// Fold the changes back into delta form.
    ///
    /// Removals and changes to `null` both become `null` here, exactly as
    /// in [`diff_values`](crate::diff_values).
    pub fn to_delta(&self) -> Value {
        let mut delta = Map::new();
        let mut root = None;
        for change in &self.changes {
            let value = change.delta_value();
            if change.path().is_root() {
                // A root change replaces the whole delta.
                root = Some(value);
            } else {
                insert_at(&mut delta, change.path().segments(), value);
            }
        }
        root.unwrap_or(Value::Object(delta))
    }
}

fn insert_at(map: &mut Map<String, Value>, segments: &[String], value: Value) {
    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [first, rest @ ..] => {
            let node = map
                .entry(first.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            if let Value::Object(child) = node {
                insert_at(child, rest, value);
            }
        }
    }
}

/// A single difference between two value trees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum Change {
    /// A key present only in the compared tree.
    Added { path: JsonPointer, value: Value },
    /// A key present only in the base tree.
    Removed { path: JsonPointer, old: Value },
    /// A value that differs between the trees, including kind changes and
    /// changes to or from `null`.
    Modified {
        path: JsonPointer,
        old: Value,
        new: Value,
    },
}

impl Change {
    /// Where the change happened.
    pub fn path(&self) -> &JsonPointer {
        match self {
            Self::Added { path, .. } | Self::Removed { path, .. } | Self::Modified { path, .. } => {
                path
            }
        }
    }

    /// Returns `true` if the value kind differs across the change.
    ///
    /// Additions and removals always count as a kind change.
    pub fn changes_kind(&self) -> bool {
        match self {
            Self::Added { .. } | Self::Removed { .. } => true,
            Self::Modified { old, new, .. } => ValueKind::of(old) != ValueKind::of(new),
        }
    }

    fn delta_value(&self) -> Value {
        match self {
            Self::Added { value, .. } => value.clone(),
            Self::Removed { .. } => Value::Null,
            Self::Modified { new, .. } => new.clone(),
        }
    }
}

/// Compute the change set from `base` to `compared`.
///
/// Fails with [`DiffError::UnsupportedOperation`] wherever
/// [`diff_values`](crate::diff_values) would.
pub fn change_set(base: &Value, compared: &Value) -> DiffResult<ChangeSet> {
    let mut changes = Vec::new();
    collect(base, compared, &JsonPointer::root(), &mut changes)?;
    changes.sort_by(|a, b| a.path().cmp(b.path()));
    trace!(changes = changes.len(), "change set computed");
    Ok(ChangeSet { changes })
}

fn collect(
    base: &Value,
    compared: &Value,
    path: &JsonPointer,
    changes: &mut Vec<Change>,
) -> DiffResult<()> {
    match base {
        Value::Object(old) => match compared {
            Value::Object(new) => collect_entries(old, new, path, changes),
            _ => {
                changes.push(modified(base, compared, path));
                Ok(())
            }
        },
        Value::Array(_) => match compared {
            Value::Array(_) => Err(DiffError::UnsupportedOperation { path: path.clone() }),
            _ => {
                changes.push(modified(base, compared, path));
                Ok(())
            }
        },
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            // Covers both kind changes and unequal scalars of one kind.
            if base != compared {
                changes.push(modified(base, compared, path));
            }
            Ok(())
        }
    }
}

fn collect_entries(
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    path: &JsonPointer,
    changes: &mut Vec<Change>,
) -> DiffResult<()> {
    for (key, old_val) in old {
        match new.get(key) {
            Some(new_val) => {
                if old_val != new_val {
                    collect(old_val, new_val, &path.child(key.as_str()), changes)?;
                }
            }
            None => changes.push(Change::Removed {
                path: path.child(key.as_str()),
                old: old_val.clone(),
            }),
        }
    }
    for (key, new_val) in new {
        if !old.contains_key(key) {
            changes.push(Change::Added {
                path: path.child(key.as_str()),
                value: new_val.clone(),
            });
        }
    }
    Ok(())
}

fn modified(base: &Value, compared: &Value, path: &JsonPointer) -> Change {
    Change::Modified {
        path: path.clone(),
        old: base.clone(),
        new: compared.clone(),
    }
}
