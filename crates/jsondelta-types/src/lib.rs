//! Foundation types for jsondelta.
//!
//! This crate provides the small vocabulary shared by the diff engine and
//! its callers. The value model itself is [`serde_json::Value`]; the types
//! here describe it rather than replace it.
//!
//! # Key Types
//!
//! - [`ValueKind`] — The closed set of value variants, used for dispatch and reporting
//! - [`JsonPointer`] — RFC 6901 pointer addressing an entry inside a value tree

pub mod error;
pub mod kind;
pub mod pointer;

pub use error::TypeError;
pub use kind::ValueKind;
pub use pointer::JsonPointer;
