//! Canonical text and order-normalized views of JSON arrays.

use serde_json::{Map, Number, Value};

/// Array elements sorted by their canonical text.
///
/// Holds references into the original array, which is never reordered.
#[derive(Debug, Clone, PartialEq)]
pub struct Canonical<'a> {
    elements: Vec<&'a Value>,
}

impl<'a> Canonical<'a> {
    pub fn elements(&self) -> &[&'a Value] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&'a Value> {
        self.elements.get(index).copied()
    }
}

/// Sorts a copy of `items` by the byte-wise order of each element's
/// [`canonical_text`].
///
/// The sort is stable, so elements with identical text keep their original
/// relative order. They are indistinguishable to the comparator anyway.
pub fn canonicalize(items: &[Value]) -> Canonical<'_> {
    let mut keyed: Vec<(String, &Value)> = items
        .iter()
        .map(|item| (canonical_text(item), item))
        .collect();
    keyed.sort_by(|a, b| a.0.cmp(&b.0));
    Canonical {
        elements: keyed.into_iter().map(|(_, item)| item).collect(),
    }
}

/// Deterministic compact JSON text of `value`.
///
/// Object keys are written in sorted order whatever the map's own iteration
/// order is. Floats with an integral value are written as integers and `-0`
/// as `0`, so two numbers that compare equal share one text.
pub fn canonical_text(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Number(n) => write_number(out, n),
        Value::String(s) => write_string(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_value(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => write_object(out, map),
    }
}

fn write_object(out: &mut String, map: &Map<String, Value>) {
    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    out.push('{');
    for (i, (key, val)) in entries.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_string(out, key);
        out.push(':');
        write_value(out, val);
    }
    out.push('}');
}

// Integral floats below 1e21 print without a fraction, as JSON.stringify does.
const MAX_PLAIN_INTEGRAL: f64 = 1e21;

fn write_number(out: &mut String, n: &Number) {
    if n.is_f64() {
        if let Some(f) = n.as_f64() {
            if f == 0.0 {
                out.push('0');
                return;
            }
            if f.fract() == 0.0 && f.abs() < MAX_PLAIN_INTEGRAL {
                out.push_str(&format!("{f:.0}"));
                return;
            }
        }
    }
    out.push_str(&n.to_string());
}

fn write_string(out: &mut String, s: &str) {
    out.push_str(&serde_json::to_string(s).unwrap_or_default());
}
