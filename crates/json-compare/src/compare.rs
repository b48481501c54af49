//! Recursive comparison: key-set reconciliation, value dispatch and
//! order-insensitive array comparison.

use std::borrow::Cow;

use indexmap::IndexSet;
use serde_json::{Map, Number, Value};

use crate::canonical::{canonicalize, Canonical};
use crate::discrepancy::Discrepancy;
use crate::error::{CompareError, Side};
use crate::kind::{as_plain_object, ValueKind};
use crate::options::CompareOptions;
use crate::path::Path;

/// Keyed view over a container taking part in key-set reconciliation.
pub trait KeySpace {
    /// Keys in iteration order, without duplicates.
    fn keys(&self) -> Vec<Cow<'_, str>>;

    fn get(&self, key: &str) -> Option<&Value>;
}

impl KeySpace for Map<String, Value> {
    fn keys(&self) -> Vec<Cow<'_, str>> {
        Map::keys(self).map(|k| Cow::Borrowed(k.as_str())).collect()
    }

    fn get(&self, key: &str) -> Option<&Value> {
        Map::get(self, key)
    }
}

/// A canonicalized array is keyed by decimal index.
impl KeySpace for Canonical<'_> {
    fn keys(&self) -> Vec<Cow<'_, str>> {
        (0..self.len()).map(|i| Cow::Owned(i.to_string())).collect()
    }

    fn get(&self, key: &str) -> Option<&Value> {
        key.parse::<usize>().ok().and_then(|i| Canonical::get(self, i))
    }
}

/// Accumulates discrepancies for one comparison pass.
#[derive(Debug)]
pub struct Collector<'o> {
    options: &'o CompareOptions,
    stop_at_first: bool,
    found: Vec<Discrepancy>,
}

impl<'o> Collector<'o> {
    pub fn new(options: &'o CompareOptions) -> Self {
        Self {
            options,
            stop_at_first: options.stop_at_first,
            found: Vec::new(),
        }
    }

    /// Overrides [`CompareOptions::stop_at_first`] for this pass.
    pub fn stop_at_first(mut self, yes: bool) -> Self {
        self.stop_at_first = yes;
        self
    }

    pub fn record(&mut self, discrepancy: Discrepancy) {
        tracing::trace!(
            path = %discrepancy.path,
            kind = ?discrepancy.kind,
            "discrepancy"
        );
        self.found.push(discrepancy);
    }

    /// Whether the pass may stop early.
    pub fn is_done(&self) -> bool {
        self.stop_at_first && !self.found.is_empty()
    }

    pub fn discrepancies(&self) -> &[Discrepancy] {
        &self.found
    }

    pub fn finish(self) -> Vec<Discrepancy> {
        self.found
    }

    fn skips(&self, path: &Path) -> bool {
        self.options.ignores(path)
    }

    fn enter(&self, path: &Path) -> Result<(), CompareError> {
        match self.options.max_depth {
            Some(limit) if path.depth() > limit => Err(CompareError::DepthLimitExceeded {
                path: path.clone(),
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Checks every container nested in `items` against the depth limit.
    ///
    /// Iterative, and never looks below the limit, so elements nested far
    /// too deep are rejected before anything recurses into them.
    fn enter_elements(&self, items: &[Value], path: &Path) -> Result<(), CompareError> {
        let Some(limit) = self.options.max_depth else {
            return Ok(());
        };
        let mut pending: Vec<(&Value, Path)> = items
            .iter()
            .enumerate()
            .rev()
            .map(|(i, item)| (item, path.child(&i.to_string())))
            .collect();
        while let Some((value, at)) = pending.pop() {
            let is_container = matches!(value, Value::Array(_) | Value::Object(_));
            if is_container && at.depth() > limit {
                return Err(CompareError::DepthLimitExceeded { path: at, limit });
            }
            match value {
                Value::Array(items) => pending.extend(
                    items
                        .iter()
                        .enumerate()
                        .rev()
                        .map(|(i, item)| (item, at.child(&i.to_string()))),
                ),
                Value::Object(map) => {
                    pending.extend(map.iter().rev().map(|(key, item)| (item, at.child(key))))
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Compares the key spaces of two containers found at `path`.
///
/// Keys present on one side only are reported as missing on the other;
/// shared keys go through [`dispatch`]. Source keys are visited first, then
/// keys that only the target has.
pub fn reconcile_keys<S, T>(
    source: &S,
    target: &T,
    path: &Path,
    collector: &mut Collector<'_>,
) -> Result<(), CompareError>
where
    S: KeySpace + ?Sized,
    T: KeySpace + ?Sized,
{
    collector.enter(path)?;
    let source_keys = source.keys();
    let target_keys = target.keys();
    let union: IndexSet<&str> = source_keys
        .iter()
        .chain(target_keys.iter())
        .map(|k| &**k)
        .collect();

    for key in union {
        if collector.is_done() {
            break;
        }
        let child = path.child(key);
        if collector.skips(&child) {
            continue;
        }
        match (source.get(key), target.get(key)) {
            (Some(a), Some(b)) => dispatch(a, b, &child, collector)?,
            (Some(a), None) => collector.record(Discrepancy::missing_in_target(child, a)),
            (None, Some(b)) => collector.record(Discrepancy::missing_in_source(child, b)),
            (None, None) => unreachable!("union keys come from one of the two key spaces"),
        }
    }
    Ok(())
}

/// Routes a pair of values to the comparison that fits their shape.
pub fn dispatch(
    source: &Value,
    target: &Value,
    path: &Path,
    collector: &mut Collector<'_>,
) -> Result<(), CompareError> {
    if let (Value::Array(a), Value::Array(b)) = (source, target) {
        return compare_arrays(a, b, path, collector);
    }
    if let (Some(a), Some(b)) = (as_plain_object(source), as_plain_object(target)) {
        return reconcile_keys(a, b, path, collector);
    }
    if !strict_equal(source, target) {
        collector.record(Discrepancy::value_mismatch(path.clone(), source, target));
    }
    Ok(())
}

/// Order-insensitive comparison of two arrays found at `path`.
///
/// Arrays of different lengths produce a single length mismatch and are not
/// descended into. Otherwise both sides are [`canonicalize`]d and compared
/// index by index through [`reconcile_keys`]. With a depth limit set, the
/// elements are checked against it before canonicalization.
pub fn compare_arrays(
    source: &[Value],
    target: &[Value],
    path: &Path,
    collector: &mut Collector<'_>,
) -> Result<(), CompareError> {
    collector.enter(path)?;
    if source.len() != target.len() {
        collector.record(Discrepancy::length_mismatch(
            path.clone(),
            source.len(),
            target.len(),
        ));
        return Ok(());
    }
    collector.enter_elements(source, path)?;
    collector.enter_elements(target, path)?;
    let source = canonicalize(source);
    let target = canonicalize(target);
    reconcile_keys(&source, &target, path, collector)
}

/// Strict equality: same type and same value.
///
/// Numbers compare by value, so `1 == 1.0` and `0.0 == -0.0`. Containers
/// never compare equal here; matching containers are handled by
/// [`dispatch`] before reaching this point.
pub fn strict_equal(source: &Value, target: &Value) -> bool {
    match (source, target) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Deep, order-insensitive comparison of two JSON objects.
#[derive(Debug, Clone, Default)]
pub struct Comparator {
    options: CompareOptions,
}

impl Comparator {
    pub fn new(options: CompareOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompareOptions {
        &self.options
    }

    /// `true` iff [`Comparator::diff`] would report nothing.
    pub fn compare(&self, source: &Value, target: &Value) -> Result<bool, CompareError> {
        let found = run(&self.options, true, source, target)?;
        Ok(found.is_empty())
    }

    /// Every discrepancy between `source` and `target`, in discovery order.
    pub fn diff(&self, source: &Value, target: &Value) -> Result<Vec<Discrepancy>, CompareError> {
        run(&self.options, self.options.stop_at_first, source, target)
    }
}

fn run(
    options: &CompareOptions,
    stop_at_first: bool,
    source: &Value,
    target: &Value,
) -> Result<Vec<Discrepancy>, CompareError> {
    let (source, target) = validate(source, target)?;
    let mut collector = Collector::new(options).stop_at_first(stop_at_first);
    reconcile_keys(source, target, &Path::root(), &mut collector)?;
    let found = collector.finish();
    tracing::debug!(discrepancies = found.len(), "comparison finished");
    Ok(found)
}

fn validate<'a>(
    source: &'a Value,
    target: &'a Value,
) -> Result<(&'a Map<String, Value>, &'a Map<String, Value>), CompareError> {
    Ok((
        require_object(source, Side::Source)?,
        require_object(target, Side::Target)?,
    ))
}

fn require_object(value: &Value, side: Side) -> Result<&Map<String, Value>, CompareError> {
    as_plain_object(value).ok_or(CompareError::InvalidInput {
        side,
        found: ValueKind::of(value),
    })
}

/// Compares two JSON objects with default options.
pub fn compare(source: &Value, target: &Value) -> Result<bool, CompareError> {
    Comparator::default().compare(source, target)
}

/// Lists every discrepancy between two JSON objects with default options.
pub fn diff(source: &Value, target: &Value) -> Result<Vec<Discrepancy>, CompareError> {
    Comparator::default().diff(source, target)
}
