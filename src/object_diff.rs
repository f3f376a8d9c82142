//! Structural differ for parsed JSON documents
//!
//! Both documents are stripped of private keys and then compared recursively:
//! objects key by key, arrays index by index, everything else as a single
//! value. Only the top level of each object/array is classified; a nested value
//! that differs is reported whole as `modified`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::{CompareError, Result};
use crate::file_utils::{is_private, read_text};

/// Classification of a single key, index, or value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Change {
    /// Present only in the second document.
    Added { value: Value },
    /// Present only in the first document.
    Removed { value: Value },
    /// Present in both with different values.
    Modified { value_1: Value, value_2: Value },
    /// Present in both and equal (only reported in show-all mode).
    Unchanged { value: Value },
}

impl Change {
    pub fn status(&self) -> &'static str {
        match self {
            Change::Added { .. } => "added",
            Change::Removed { .. } => "removed",
            Change::Modified { .. } => "modified",
            Change::Unchanged { .. } => "unchanged",
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, Change::Unchanged { .. })
    }
}

/// Structural difference between two JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ObjectDiff {
    /// Both sides were objects; one entry per reported key.
    Fields(BTreeMap<String, Change>),
    /// Both sides were arrays; one entry per reported index, in index order.
    Elements(Vec<Change>),
    /// Scalars or mismatched types.
    Value(Change),
}

impl ObjectDiff {
    /// Check if the diff reports nothing.
    pub fn is_empty(&self) -> bool {
        match self {
            ObjectDiff::Fields(fields) => fields.is_empty(),
            ObjectDiff::Elements(elements) => elements.is_empty(),
            ObjectDiff::Value(_) => false,
        }
    }

    /// Count entries that are not `unchanged`.
    pub fn change_count(&self) -> usize {
        match self {
            ObjectDiff::Fields(fields) => fields.values().filter(|c| !c.is_unchanged()).count(),
            ObjectDiff::Elements(elements) => elements.iter().filter(|c| !c.is_unchanged()).count(),
            ObjectDiff::Value(change) => usize::from(!change.is_unchanged()),
        }
    }
}

/// Parse and compare two JSON files.
///
/// Returns `Ok(None)` when the documents are equal (and `show_all` is off).
/// A file that fails to decode yields `CompareError::Parse`.
pub fn diff_structured(path_a: &Path, path_b: &Path, show_all: bool) -> Result<Option<ObjectDiff>> {
    let a = strip_private_keys(parse_json(path_a)?);
    let b = strip_private_keys(parse_json(path_b)?);
    Ok(generate_diff(&a, &b, show_all))
}

fn parse_json(path: &Path) -> Result<Value> {
    let text = read_text(path)?;
    serde_json::from_str(&text).map_err(|source| CompareError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Recursively remove every object key starting with the private prefix.
pub fn strip_private_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, _)| !is_private(key))
                .map(|(key, v)| (key, strip_private_keys(v)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_private_keys).collect()),
        scalar => scalar,
    }
}

/// Compare two values.
///
/// Objects and arrays always produce a (possibly empty) `Fields`/`Elements`
/// diff. Anything else produces a single `Value` change, or `None` when the
/// values are equal and `show_all` is off.
pub fn generate_diff(a: &Value, b: &Value, show_all: bool) -> Option<ObjectDiff> {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => Some(ObjectDiff::Fields(diff_objects(a, b, show_all))),
        (Value::Array(a), Value::Array(b)) => Some(ObjectDiff::Elements(diff_arrays(a, b, show_all))),
        _ => compare_values(a, b, show_all).map(ObjectDiff::Value),
    }
}

fn diff_objects(a: &Map<String, Value>, b: &Map<String, Value>, show_all: bool) -> BTreeMap<String, Change> {
    let mut fields = BTreeMap::new();

    for (key, value_a) in a {
        let change = match b.get(key) {
            None => Some(Change::Removed {
                value: value_a.clone(),
            }),
            Some(value_b) => compare_values(value_a, value_b, show_all),
        };
        if let Some(change) = change {
            fields.insert(key.clone(), change);
        }
    }

    for (key, value_b) in b {
        if !a.contains_key(key) {
            fields.insert(
                key.clone(),
                Change::Added {
                    value: value_b.clone(),
                },
            );
        }
    }

    fields
}

fn diff_arrays(a: &[Value], b: &[Value], show_all: bool) -> Vec<Change> {
    (0..a.len().max(b.len()))
        .filter_map(|i| match (a.get(i), b.get(i)) {
            (Some(value_a), Some(value_b)) => compare_values(value_a, value_b, show_all),
            (Some(value_a), None) => Some(Change::Removed {
                value: value_a.clone(),
            }),
            (None, Some(value_b)) => Some(Change::Added {
                value: value_b.clone(),
            }),
            (None, None) => None,
        })
        .collect()
}

fn compare_values(a: &Value, b: &Value, show_all: bool) -> Option<Change> {
    if !values_equal(a, b) {
        Some(Change::Modified {
            value_1: a.clone(),
            value_2: b.clone(),
        })
    } else if show_all {
        Some(Change::Unchanged { value: a.clone() })
    } else {
        None
    }
}

/// Deep value equality.
///
/// Values of different JSON types are never equal. Numbers compare by
/// numeric value, so `1` equals `1.0`.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(key, a)| y.get(key).is_some_and(|b| values_equal(a, b)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(a), Some(b)) = (x.as_i64(), y.as_i64()) {
        return a == b;
    }
    if let (Some(a), Some(b)) = (x.as_u64(), y.as_u64()) {
        return a == b;
    }
    if x.is_f64() || y.is_f64() {
        return match (x.as_f64(), y.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        };
    }
    // One side is a negative i64, the other a u64 beyond i64::MAX.
    false
}
