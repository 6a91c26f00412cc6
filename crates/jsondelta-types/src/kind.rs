use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The variant of a JSON value, without its payload.
///
/// The set is closed: every [`Value`] maps to exactly one `ValueKind`, so a
/// `match` over a pair of kinds is checked for exhaustiveness at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Object,
    Array,
}

impl ValueKind {
    /// The kind of `value`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Object(_) => Self::Object,
            Value::Array(_) => Self::Array,
        }
    }

    /// Returns `true` for `Null`, `Bool`, `Number` and `String`.
    pub fn is_scalar(self) -> bool {
        !self.is_container()
    }

    /// Returns `true` for `Object` and `Array`.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Object | Self::Array)
    }

    /// Lowercase name, as used in `Display` and serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&Value> for ValueKind {
    fn from(value: &Value) -> Self {
        Self::of(value)
    }
}
