//! Shared file reading utilities for the differencers
//!
//! Snapshot files are read whole, decoded leniently, and split into lines that
//! keep their terminators. Names are split into base and extension the same
//! way everywhere so grouping and reporting agree.

use std::fs;
use std::path::Path;

use glob::Pattern;

use crate::error::{CompareError, Result};

/// Prefix marking a file, directory, or object key as private.
pub const PRIVATE_PREFIX: &str = "__";

/// Check if a name is private and must be invisible to the comparison.
pub fn is_private(name: &str) -> bool {
    name.starts_with(PRIVATE_PREFIX)
}

/// Check if an entry name matches any of the given ignore patterns.
///
/// A pattern matches either the exact name or as a glob.
pub fn matches_ignore_pattern(name: &str, patterns: &[String]) -> bool {
    patterns
        .iter()
        .any(|pattern| name == pattern || glob_match(pattern, name))
}

/// Match a glob pattern against a name. Invalid patterns never match.
pub fn glob_match(pattern: &str, name: &str) -> bool {
    Pattern::new(pattern)
        .map(|p| p.matches(name))
        .unwrap_or(false)
}

/// Split a file name into base name and extension.
///
/// The extension starts at the final dot and includes it. Leading dots are
/// part of the base name, so dotfiles have no extension.
///
/// ```
/// use snapdiff::file_utils::split_extension;
///
/// assert_eq!(split_extension("a.tar.gz"), ("a.tar", ".gz"));
/// assert_eq!(split_extension(".bashrc"), (".bashrc", ""));
/// ```
pub fn split_extension(name: &str) -> (&str, &str) {
    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].rfind('.') {
        Some(idx) => name.split_at(leading + idx),
        None => (name, ""),
    }
}

/// Decode bytes as UTF-8, dropping any invalid sequences.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

/// Read a whole file as text, ignoring undecodable bytes.
///
/// `\r\n` and lone `\r` line endings are normalized to `\n`.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| CompareError::io(path, e))?;
    let text = decode_ignoring_invalid(&bytes);
    if text.contains('\r') {
        Ok(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Ok(text)
    }
}

/// Split text into lines, each keeping its `\n` terminator.
///
/// A final line without a terminator is kept as-is, so `"a"` and `"a\n"`
/// produce different line sequences.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Check whether a file exceeds the given size limit.
///
/// Returns `false` when there is no limit or the size can't be determined;
/// the subsequent read reports the real problem.
pub fn exceeds_size_limit(path: &Path, limit: Option<u64>) -> bool {
    match (limit, path.metadata()) {
        (Some(max), Ok(meta)) => meta.len() > max,
        _ => false,
    }
}
