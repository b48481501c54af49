use std::fmt;

use thiserror::Error;

use crate::kind::ValueKind;
use crate::path::Path;

/// Which of the two compared documents an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Source => f.write_str("source"),
            Side::Target => f.write_str("target"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    /// A top-level argument is not a plain object.
    #[error("invalid {side} input: expected an object, found {found}")]
    InvalidInput { side: Side, found: ValueKind },
    /// Nesting went past [`crate::CompareOptions::max_depth`].
    #[error("nesting depth limit of {limit} exceeded at `{path}`")]
    DepthLimitExceeded { path: Path, limit: usize },
}
