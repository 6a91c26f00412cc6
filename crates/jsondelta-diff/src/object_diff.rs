//! Object-level diff: compare two serializable Rust values.
//!
//! Both values are converted to value trees with [`serde_json::to_value`]
//! and then diffed with [`diff_values`]. `Option::None` fields serialize as
//! a present `null`, so clearing an optional field shows up as `field: null`
//! rather than being skipped. Fields omitted via
//! `#[serde(skip_serializing_if = ...)]` are absent keys and therefore read
//! as removals or additions.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::DiffResult;
use crate::value_diff::diff_values;

/// Compute the delta between two serializable values.
///
/// The two values need not share a type; only their serialized shapes are
/// compared.
pub fn diff_objects<A, B>(base: &A, compared: &B) -> DiffResult<Value>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let base = serde_json::to_value(base)?;
    let compared = serde_json::to_value(compared)?;
    debug!(
        base_kind = %jsondelta_types::ValueKind::of(&base),
        compared_kind = %jsondelta_types::ValueKind::of(&compared),
        "diffing serialized values"
    );
    diff_values(&base, &compared)
}
