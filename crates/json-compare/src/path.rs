//! Location of a value inside a compared document.

use std::fmt;

use serde::{Serialize, Serializer};

/// Ordered list of key segments from the document root to a value.
///
/// The root path has no segments. Array elements are addressed by their
/// decimal index (after canonical sorting, see [`crate::canonicalize`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    /// The empty root path.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a new path with `key` appended. `self` is left untouched.
    pub fn child(&self, key: &str) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(key.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments, i.e. how many containers deep the value sits.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Renders the path as an RFC 6901 JSON Pointer.
    ///
    /// Unlike the dotted form this is unambiguous for keys that contain `.`:
    /// - `[] -> ""`
    /// - `["a.b", "c/d", "0"] -> "/a.b/c~1d/0"`
    pub fn to_json_pointer(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            if segment.contains('~') || segment.contains('/') {
                out.push_str(&segment.replace('~', "~0").replace('/', "~1"));
            } else {
                out.push_str(segment);
            }
        }
        out
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Dotted form: segments joined by `.` with no leading separator.
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl Serialize for Path {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
