//! Lockstep traversal of two snapshot trees.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CompareError, Result};
use crate::file_utils::{exceeds_size_limit, is_private, matches_ignore_pattern};
use crate::logger::DiffLogger;
use crate::object_diff::diff_structured;
use crate::text_diff::diff_text;

use super::classify::{
    ExtensionMap, JSON_EXT, Resolution, group_by_base, resolve, shared_extensions,
};
use super::config::{CompareConfig, UnmatchedPolicy};
use super::result::DiffResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File,
    Dir,
    Other,
}

/// A visible (non-private, non-ignored) directory entry.
#[derive(Debug)]
struct Entry {
    name: String,
    kind: EntryKind,
    is_symlink: bool,
}

/// State for one top-level comparison: the first snapshot root anchors every
/// relative key, however deep the walk goes.
pub(crate) struct SnapshotTraversal<'a> {
    config: &'a CompareConfig,
    logger: &'a dyn DiffLogger,
    root_a: &'a Path,
}

impl<'a> SnapshotTraversal<'a> {
    pub(crate) fn new(config: &'a CompareConfig, logger: &'a dyn DiffLogger, root_a: &'a Path) -> Self {
        Self {
            config,
            logger,
            root_a,
        }
    }

    /// Compare two directories and everything below them into `acc`.
    pub(crate) fn compare_directories(&self, dir_a: &Path, dir_b: &Path, acc: &mut DiffResult) {
        let (entries_a, entries_b) = match (self.list_entries(dir_a), self.list_entries(dir_b)) {
            (Ok(a), Ok(b)) => (a, b),
            (Err(e), _) | (_, Err(e)) => {
                self.logger.error(&e.to_string());
                return;
            }
        };

        let by_name_a: BTreeMap<&str, &Entry> = entries_a.iter().map(|e| (e.name.as_str(), e)).collect();
        let by_name_b: BTreeMap<&str, &Entry> = entries_b.iter().map(|e| (e.name.as_str(), e)).collect();

        for name in by_name_a.keys().filter(|n| !by_name_b.contains_key(*n)) {
            acc.record_exclusive(dir_a, *name);
        }
        for name in by_name_b.keys().filter(|n| !by_name_a.contains_key(*n)) {
            acc.record_exclusive(dir_b, *name);
        }

        let groups_a = group_by_base(file_names(&entries_a));
        let groups_b = group_by_base(file_names(&entries_b));
        let bases: BTreeSet<&String> = groups_a.keys().chain(groups_b.keys()).collect();
        for base in bases {
            self.compare_group(dir_a, dir_b, base, &groups_a, &groups_b, acc);
        }

        for (name, entry_a) in &by_name_a {
            let Some(entry_b) = by_name_b.get(name) else {
                continue;
            };
            if entry_a.kind != EntryKind::Dir || entry_b.kind != EntryKind::Dir {
                continue;
            }
            if entry_a.is_symlink || entry_b.is_symlink {
                self.logger
                    .debug(&format!("Not descending into symlinked directory {}", name));
                continue;
            }
            self.compare_directories(&dir_a.join(name), &dir_b.join(name), acc);
        }
    }

    fn compare_group(
        &self,
        dir_a: &Path,
        dir_b: &Path,
        base: &str,
        groups_a: &ExtensionMap,
        groups_b: &ExtensionMap,
        acc: &mut DiffResult,
    ) {
        let exts_a = groups_a.get(base);
        let exts_b = groups_b.get(base);

        match resolve(exts_a, exts_b) {
            Resolution::Structured => self.compare_structured(dir_a, dir_b, base, acc),
            Resolution::Text(ext) => self.compare_text(dir_a, dir_b, base, ext, acc),
            Resolution::LeftOnly => record_group(acc, dir_a, base, exts_a),
            Resolution::RightOnly => record_group(acc, dir_b, base, exts_b),
            Resolution::Unmatched => {
                if let (UnmatchedPolicy::TextDiff, Some(a), Some(b)) = (self.config.unmatched, exts_a, exts_b) {
                    for ext in shared_extensions(a, b) {
                        self.compare_text(dir_a, dir_b, base, ext, acc);
                    }
                } else {
                    self.logger
                        .debug(&format!("No comparison rule for {} in {}", base, dir_a.display()));
                }
            }
        }
    }

    fn compare_structured(&self, dir_a: &Path, dir_b: &Path, base: &str, acc: &mut DiffResult) {
        let file_name = format!("{}{}", base, JSON_EXT);
        let (path_a, path_b) = (dir_a.join(&file_name), dir_b.join(&file_name));
        if !self.within_size_limit(&path_a, &path_b) {
            return;
        }

        match diff_structured(&path_a, &path_b, self.config.show_all_objects) {
            Ok(Some(diff)) if !diff.is_empty() => {
                acc.object_diffs.insert(self.relative_key(dir_a, &file_name), diff);
            }
            Ok(_) => {}
            Err(e) => self.logger.error(&e.to_string()),
        }
    }

    fn compare_text(&self, dir_a: &Path, dir_b: &Path, base: &str, ext: &str, acc: &mut DiffResult) {
        let file_name = format!("{}{}", base, ext);
        let (path_a, path_b) = (dir_a.join(&file_name), dir_b.join(&file_name));
        if !self.within_size_limit(&path_a, &path_b) {
            return;
        }

        match diff_text(&path_a, &path_b, self.config.show_all_files) {
            Ok(Some(diff)) if !diff.is_empty() => {
                acc.file_diffs.insert(self.relative_key(dir_a, &file_name), diff);
            }
            Ok(_) => {}
            Err(e) => self.logger.error(&e.to_string()),
        }
    }

    fn within_size_limit(&self, path_a: &Path, path_b: &Path) -> bool {
        for path in [path_a, path_b] {
            if exceeds_size_limit(path, self.config.max_file_size) {
                self.logger
                    .info(&format!("Skipping {}: larger than the size limit", path.display()));
                return false;
            }
        }
        true
    }

    /// Key for a file in `dir_a`, relative to the first snapshot root with `/` separators.
    fn relative_key(&self, dir_a: &Path, file_name: &str) -> String {
        let rel = dir_a.strip_prefix(self.root_a).unwrap_or(dir_a);
        let mut key = String::new();
        for component in rel.components() {
            key.push_str(&component.as_os_str().to_string_lossy());
            key.push('/');
        }
        key.push_str(file_name);
        key
    }

    /// Read, filter, and sort directory entries
    fn list_entries(&self, dir: &Path) -> Result<Vec<Entry>> {
        let read_dir = fs::read_dir(dir).map_err(|e| CompareError::io(dir, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = entry.map_err(|e| CompareError::io(dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if is_private(&name) || matches_ignore_pattern(&name, &self.config.ignore_patterns) {
                continue;
            }

            let path: PathBuf = entry.path();
            let is_symlink = entry.file_type().map(|t| t.is_symlink()).unwrap_or(false);
            // Follows symlinks; a dangling link is neither file nor directory
            let kind = match fs::metadata(&path) {
                Ok(meta) if meta.is_file() => EntryKind::File,
                Ok(meta) if meta.is_dir() => EntryKind::Dir,
                _ => EntryKind::Other,
            };
            entries.push(Entry {
                name,
                kind,
                is_symlink,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

fn file_names(entries: &[Entry]) -> impl Iterator<Item = &str> {
    entries
        .iter()
        .filter(|e| e.kind == EntryKind::File)
        .map(|e| e.name.as_str())
}

fn record_group(acc: &mut DiffResult, dir: &Path, base: &str, exts: Option<&BTreeSet<String>>) {
    for ext in exts.into_iter().flatten() {
        acc.record_exclusive(dir, format!("{}{}", base, ext));
    }
}
