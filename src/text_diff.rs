//! Line-oriented text differ
//!
//! Aligns two line sequences with a longest-common-subsequence table and
//! keeps only the lines that were removed from the first file or added in the
//! second. Within each changed region the two sides alternate line by line.

use std::fmt;
use std::path::Path;

use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::file_utils::{read_text, split_lines};

/// A line that differs between two text files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangedLine {
    /// Present only in the first file.
    Removed(String),
    /// Present only in the second file.
    Added(String),
}

impl ChangedLine {
    fn removed(line: &str) -> Self {
        ChangedLine::Removed(line.trim().to_string())
    }

    fn added(line: &str) -> Self {
        ChangedLine::Added(line.trim().to_string())
    }

    /// The line content without marker or surrounding whitespace.
    pub fn text(&self) -> &str {
        match self {
            ChangedLine::Removed(text) | ChangedLine::Added(text) => text,
        }
    }

    pub fn is_added(&self) -> bool {
        matches!(self, ChangedLine::Added(_))
    }

    fn marker(&self) -> char {
        match self {
            ChangedLine::Removed(_) => '-',
            ChangedLine::Added(_) => '+',
        }
    }
}

impl fmt::Display for ChangedLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text().is_empty() {
            write!(f, "{}", self.marker())
        } else {
            write!(f, "{} {}", self.marker(), self.text())
        }
    }
}

impl Serialize for ChangedLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Result of comparing two text files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TextDiff {
    /// Removed and added lines, interleaved in alignment order.
    Changed(Vec<ChangedLine>),
    /// The files are identical; holds every line (only produced in show-all mode).
    Unchanged(Vec<String>),
}

impl TextDiff {
    /// Check if the diff carries no lines at all.
    pub fn is_empty(&self) -> bool {
        match self {
            TextDiff::Changed(lines) => lines.is_empty(),
            TextDiff::Unchanged(lines) => lines.is_empty(),
        }
    }
}

/// Compare two text files line by line.
///
/// Returns `Ok(None)` when the files have identical lines, unless `show_all`
/// is set, in which case the full (unchanged) content is returned.
pub fn diff_text(path_a: &Path, path_b: &Path, show_all: bool) -> Result<Option<TextDiff>> {
    let content_a = read_text(path_a)?;
    let content_b = read_text(path_b)?;
    let lines_a = split_lines(&content_a);
    let lines_b = split_lines(&content_b);

    if lines_a == lines_b {
        if show_all {
            let lines = lines_a
                .iter()
                .map(|l| l.trim_end_matches('\n').to_string())
                .collect();
            return Ok(Some(TextDiff::Unchanged(lines)));
        }
        return Ok(None);
    }

    Ok(Some(TextDiff::Changed(diff_lines(&lines_a, &lines_b))))
}

/// Largest LCS table built before falling back to a positional diff.
const MAX_TABLE_CELLS: usize = 16 * 1024 * 1024;

/// Compute the removed and added lines between two line sequences.
///
/// Each changed region between matched lines is emitted pairwise: the first
/// removed line, then the first added line, and so on, with the longer side's
/// leftovers last. When the changed middle of both inputs is too large for an
/// LCS table, the whole middle is treated as one changed region.
pub fn diff_lines(a: &[&str], b: &[&str]) -> Vec<ChangedLine> {
    // Common prefix and suffix never show up in the output; skip them so the
    // table only covers the changed middle.
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let a = &a[prefix..];
    let b = &b[prefix..];
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let a = &a[..a.len() - suffix];
    let b = &b[..b.len() - suffix];

    let mut changes = Vec::new();
    if (a.len() + 1).saturating_mul(b.len() + 1) > MAX_TABLE_CELLS {
        push_region(&mut changes, a, b);
        return changes;
    }

    let table = lcs_table(a, b);
    let width = b.len() + 1;
    let (mut i, mut j) = (0, 0);
    let (mut region_a, mut region_b) = (0, 0);

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            push_region(&mut changes, &a[region_a..i], &b[region_b..j]);
            i += 1;
            j += 1;
            region_a = i;
            region_b = j;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    push_region(&mut changes, &a[region_a..], &b[region_b..]);

    changes
}

/// Emit one changed region, alternating removed and added lines by position.
fn push_region(changes: &mut Vec<ChangedLine>, removed: &[&str], added: &[&str]) {
    for k in 0..removed.len().max(added.len()) {
        if let Some(line) = removed.get(k) {
            changes.push(ChangedLine::removed(line));
        }
        if let Some(line) = added.get(k) {
            changes.push(ChangedLine::added(line));
        }
    }
}

/// Build the suffix LCS length table, row-major with `b.len() + 1` columns.
///
/// `table[i][j]` is the LCS length of `a[i..]` and `b[j..]`.
fn lcs_table(a: &[&str], b: &[&str]) -> Vec<u32> {
    let width = b.len() + 1;
    let mut table = vec![0u32; (a.len() + 1) * width];

    for i in (0..a.len()).rev() {
        for j in (0..b.len()).rev() {
            table[i * width + j] = if a[i] == b[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    table
}
