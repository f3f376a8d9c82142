//! Extension-based grouping and strategy selection
//!
//! Files in one directory are grouped by base name. For each base name the
//! extension sets of both sides decide which comparison runs:
//!
//! 1. `.json` on both sides: structural diff
//! 2. `.output` on both sides, `.json` on neither: text diff
//! 3. `.cfg` on both sides, `.json` on neither: text diff
//! 4. base on one side only: every file of that base is one-sided
//!
//! Anything else present on both sides is unmatched.

use std::collections::{BTreeMap, BTreeSet};

use crate::file_utils::split_extension;

pub const JSON_EXT: &str = ".json";
pub const OUTPUT_EXT: &str = ".output";
pub const CFG_EXT: &str = ".cfg";

/// Base name -> set of extensions, for one directory on one side.
pub type ExtensionMap = BTreeMap<String, BTreeSet<String>>;

/// Group file names by base name.
pub fn group_by_base<'a>(names: impl IntoIterator<Item = &'a str>) -> ExtensionMap {
    let mut groups = ExtensionMap::new();
    for name in names {
        let (base, ext) = split_extension(name);
        groups
            .entry(base.to_string())
            .or_default()
            .insert(ext.to_string());
    }
    groups
}

/// Comparison chosen for one base name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Compare the `.json` files structurally.
    Structured,
    /// Compare the files with this extension line by line.
    Text(&'static str),
    /// Base name exists only in the first snapshot.
    LeftOnly,
    /// Base name exists only in the second snapshot.
    RightOnly,
    /// Present on both sides, but no rule applies.
    Unmatched,
}

/// Decide how to compare one base name given its extensions on each side.
pub fn resolve(left: Option<&BTreeSet<String>>, right: Option<&BTreeSet<String>>) -> Resolution {
    let (left, right) = match (left, right) {
        (Some(l), Some(r)) => (l, r),
        (Some(_), None) => return Resolution::LeftOnly,
        (None, Some(_)) => return Resolution::RightOnly,
        (None, None) => return Resolution::Unmatched,
    };

    let both = |ext: &str| left.contains(ext) && right.contains(ext);
    let json_anywhere = left.contains(JSON_EXT) || right.contains(JSON_EXT);

    if both(JSON_EXT) {
        Resolution::Structured
    } else if both(OUTPUT_EXT) && !json_anywhere {
        Resolution::Text(OUTPUT_EXT)
    } else if both(CFG_EXT) && !json_anywhere {
        Resolution::Text(CFG_EXT)
    } else {
        Resolution::Unmatched
    }
}

/// Extensions present on both sides, in lexical order.
pub fn shared_extensions<'a>(left: &'a BTreeSet<String>, right: &'a BTreeSet<String>) -> Vec<&'a str> {
    left.intersection(right).map(String::as_str).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exts(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_group_by_base() {
        let groups = group_by_base(["r1.json", "r1.output", "r1.cfg", "r2.cfg", "README"]);
        assert_eq!(groups.len(), 3);
        assert_eq!(groups["r1"], exts(&[".json", ".output", ".cfg"]));
        assert_eq!(groups["r2"], exts(&[".cfg"]));
        assert_eq!(groups["README"], exts(&[""]));
    }

    #[test]
    fn test_json_wins() {
        let both = exts(&[".json", ".output", ".cfg"]);
        assert_eq!(resolve(Some(&both), Some(&both)), Resolution::Structured);
        assert_eq!(
            resolve(Some(&exts(&[".json"])), Some(&exts(&[".json", ".cfg"]))),
            Resolution::Structured
        );
    }

    #[test]
    fn test_output_before_cfg() {
        let both = exts(&[".output", ".cfg"]);
        assert_eq!(resolve(Some(&both), Some(&both)), Resolution::Text(OUTPUT_EXT));
        assert_eq!(
            resolve(Some(&exts(&[".cfg"])), Some(&exts(&[".cfg", ".output"]))),
            Resolution::Text(CFG_EXT)
        );
    }

    #[test]
    fn test_one_sided_json_blocks_text_rules() {
        let left = exts(&[".json", ".output", ".cfg"]);
        let right = exts(&[".output", ".cfg"]);
        assert_eq!(resolve(Some(&left), Some(&right)), Resolution::Unmatched);
        assert_eq!(resolve(Some(&right), Some(&left)), Resolution::Unmatched);
    }

    #[test]
    fn test_unrecognized_and_mismatched_extensions() {
        assert_eq!(
            resolve(Some(&exts(&[".xyz"])), Some(&exts(&[".xyz"]))),
            Resolution::Unmatched
        );
        assert_eq!(
            resolve(Some(&exts(&[".json"])), Some(&exts(&[".output"]))),
            Resolution::Unmatched
        );
    }

    #[test]
    fn test_one_sided_base() {
        let set = exts(&[".json"]);
        assert_eq!(resolve(Some(&set), None), Resolution::LeftOnly);
        assert_eq!(resolve(None, Some(&set)), Resolution::RightOnly);
    }

    #[test]
    fn test_shared_extensions() {
        let left = exts(&[".xyz", ".log", ".txt"]);
        let right = exts(&[".txt", ".xyz"]);
        assert_eq!(shared_extensions(&left, &right), vec![".txt", ".xyz"]);
    }
}
