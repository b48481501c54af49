use std::collections::BTreeSet;

use serde::Deserialize;

use crate::path::Path;

/// Knobs for a [`crate::Comparator`].
///
/// The defaults reproduce the plain comparison: unbounded nesting, nothing
/// ignored, every discrepancy reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompareOptions {
    /// Maximum number of containers a compared value may sit below the root.
    pub max_depth: Option<usize>,
    /// Dotted paths whose whole subtree is left out of the comparison.
    pub ignore_paths: BTreeSet<String>,
    /// Stop collecting after the first discrepancy.
    pub stop_at_first: bool,
}

impl CompareOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn ignore_path(mut self, path: impl Into<String>) -> Self {
        self.ignore_paths.insert(path.into());
        self
    }

    pub fn stop_at_first(mut self, yes: bool) -> Self {
        self.stop_at_first = yes;
        self
    }

    pub(crate) fn ignores(&self, path: &Path) -> bool {
        !self.ignore_paths.is_empty() && self.ignore_paths.contains(&path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let options = CompareOptions::new()
            .max_depth(4)
            .ignore_path("meta.updated_at")
            .stop_at_first(true);
        assert_eq!(options.max_depth, Some(4));
        assert!(options.stop_at_first);
        assert!(options.ignores(&"meta.updated_at".split('.').collect::<Path>()));
        assert!(!options.ignores(&Path::root().child("meta")));
    }

    #[test]
    fn loads_from_toml() {
        let options: CompareOptions = toml::from_str(
            r#"
            max_depth = 8
            ignore_paths = ["id", "user.last_seen"]
            "#,
        )
        .unwrap();
        assert_eq!(options.max_depth, Some(8));
        assert_eq!(options.ignore_paths.len(), 2);
        assert!(!options.stop_at_first);
    }

    #[test]
    fn empty_toml_is_default() {
        let options: CompareOptions = toml::from_str("").unwrap();
        assert_eq!(options, CompareOptions::default());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<CompareOptions>("depth = 3").is_err());
    }
}
