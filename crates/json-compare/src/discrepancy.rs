//! Records describing where two documents diverge.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Key present in the source object only.
    MissingInTarget,
    /// Key present in the target object only.
    MissingInSource,
    /// Arrays of different lengths; elements were not compared.
    LengthMismatch,
    /// Primitives differ, or the two values have different shapes.
    ValueMismatch,
}

/// One divergence found during a comparison pass.
///
/// `source` and `target` hold the values involved: both for
/// [`DiscrepancyKind::ValueMismatch`], the present side for the two missing
/// kinds, and neither for [`DiscrepancyKind::LengthMismatch`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Discrepancy {
    pub path: Path,
    pub kind: DiscrepancyKind,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<Value>,
}

impl Discrepancy {
    pub fn missing_in_target(path: Path, source: &Value) -> Self {
        Self {
            detail: format!("`{path}` is missing in target"),
            path,
            kind: DiscrepancyKind::MissingInTarget,
            source: Some(source.clone()),
            target: None,
        }
    }

    pub fn missing_in_source(path: Path, target: &Value) -> Self {
        Self {
            detail: format!("`{path}` is missing in source"),
            path,
            kind: DiscrepancyKind::MissingInSource,
            source: None,
            target: Some(target.clone()),
        }
    }

    pub fn length_mismatch(path: Path, source_len: usize, target_len: usize) -> Self {
        Self {
            detail: format!(
                "array length mismatch: source has {source_len} elements, target has {target_len}"
            ),
            path,
            kind: DiscrepancyKind::LengthMismatch,
            source: None,
            target: None,
        }
    }

    pub fn value_mismatch(path: Path, source: &Value, target: &Value) -> Self {
        Self {
            detail: format!("value mismatch: source {source} != target {target}"),
            path,
            kind: DiscrepancyKind::ValueMismatch,
            source: Some(source.clone()),
            target: Some(target.clone()),
        }
    }
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.detail)
    }
}
