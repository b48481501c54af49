//! json-compare - order-insensitive deep comparison of JSON documents.
//!
//! Compares two top-level JSON objects and either answers whether they are
//! equivalent ([`compare`]) or lists every place where they diverge
//! ([`diff`]). Objects are compared by key set, primitives by strict
//! equality, and arrays without regard to element order: both sides are
//! sorted by each element's canonical JSON text and then paired up by index.
//!
//! ```
//! use json_compare::{compare, diff, DiscrepancyKind};
//! use serde_json::json;
//!
//! let a = json!({"user": {"name": "A", "tags": ["x", "y"]}});
//! let b = json!({"user": {"name": "A", "tags": ["y", "x"]}});
//! assert!(compare(&a, &b).unwrap());
//!
//! let found = diff(&json!({"a": 1, "b": 2}), &json!({"a": 1})).unwrap();
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].kind, DiscrepancyKind::MissingInTarget);
//! assert_eq!(found[0].path.to_string(), "b");
//! ```
//!
//! The individual stages ([`reconcile_keys`], [`dispatch`],
//! [`compare_arrays`], [`canonicalize`]) are free functions so they can be
//! driven directly with a [`Collector`].

mod canonical;
mod compare;
mod discrepancy;
mod error;
mod kind;
mod options;
mod path;

pub use canonical::{canonical_text, canonicalize, Canonical};
pub use compare::{
    compare, compare_arrays, diff, dispatch, reconcile_keys, strict_equal, Collector, Comparator,
    KeySpace,
};
pub use discrepancy::{Discrepancy, DiscrepancyKind};
pub use error::{CompareError, Side};
pub use kind::{as_plain_object, is_plain_object, ValueKind};
pub use options::CompareOptions;
pub use path::Path;
