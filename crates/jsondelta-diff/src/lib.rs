//! Diff engine for jsondelta.
//!
//! Computes the minimal structural difference between a *base* and a
//! *compared* JSON value tree. The result, the delta, is itself a JSON value:
//!
//! - a key present in the delta but not in the base is an addition,
//! - a key mapped to `null` is a removal (or a change to `null`),
//! - any other key holds the changed value, diffed recursively when both
//!   sides are objects,
//! - unchanged keys are omitted, so an empty object means "no change".
//!
//! Arrays are not diffed: comparing two arrays is reported as
//! [`DiffError::UnsupportedOperation`].
//!
//! # Key Types
//!
//! - [`diff`] / [`diff_values`] -- Delta between two value trees
//! - [`diff_objects`] -- Delta between two serializable Rust values
//! - [`ChangeSet`] / [`Change`] -- Flattened, path-addressed view of the same differences

pub mod change_set;
pub mod error;
pub mod object_diff;
pub mod value_diff;

pub use change_set::{change_set, Change, ChangeSet};
pub use error::{DiffError, DiffResult};
pub use object_diff::diff_objects;
pub use value_diff::{diff, diff_values};

pub use jsondelta_types::{JsonPointer, ValueKind};
