//! Diff result accumulated over a whole comparison

use std::collections::BTreeMap;
use std::path::Path;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::object_diff::ObjectDiff;
use crate::text_diff::TextDiff;

/// Aggregated differences between two snapshots.
///
/// `file_diffs` and `object_diffs` are keyed by the path relative to the first
/// snapshot root. Directory-exclusivity lists are keyed by the directory that
/// holds the one-sided entries and serialize as `"<dir> only"` members.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiffResult {
    pub file_diffs: BTreeMap<String, TextDiff>,
    pub object_diffs: BTreeMap<String, ObjectDiff>,
    exclusive: BTreeMap<String, Vec<String>>,
}

impl DiffResult {
    /// Check if no file or object differences were found.
    ///
    /// Directory-exclusivity lists are not considered.
    pub fn is_empty(&self) -> bool {
        self.file_diffs.is_empty() && self.object_diffs.is_empty()
    }

    /// Append an entry that exists only in `dir`.
    ///
    /// Lists are not deduplicated: a one-sided file is reported once as a
    /// directory entry and once through its base-name group.
    pub fn record_exclusive(&mut self, dir: &Path, name: impl Into<String>) {
        self.exclusive
            .entry(dir.display().to_string())
            .or_default()
            .push(name.into());
    }

    /// Entries found in only one snapshot, as `(directory, names)` pairs.
    pub fn exclusive_entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.exclusive
            .iter()
            .map(|(dir, names)| (dir.as_str(), names.as_slice()))
    }

    /// Names recorded as exclusive to `dir`, if any.
    pub fn exclusive_to(&self, dir: &Path) -> Option<&[String]> {
        self.exclusive
            .get(&dir.display().to_string())
            .map(Vec::as_slice)
    }

    /// Member name used for a directory's exclusivity list.
    pub fn exclusive_key(dir: &str) -> String {
        format!("{} only", dir)
    }
}

impl Serialize for DiffResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }

        let mut map = serializer.serialize_map(Some(2 + self.exclusive.len()))?;
        map.serialize_entry("file_diffs", &self.file_diffs)?;
        map.serialize_entry("object_diffs", &self.object_diffs)?;
        for (dir, names) in &self.exclusive {
            map.serialize_entry(&Self::exclusive_key(dir), names)?;
        }
        map.end()
    }
}
