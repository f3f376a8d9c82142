//! Configuration types for snapshot comparison

/// What to do with a base name present on both sides whose extensions match
/// none of the recognized comparison rules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnmatchedPolicy {
    /// Report nothing for it.
    #[default]
    Skip,
    /// Text-diff every extension both sides share.
    TextDiff,
}

/// Configuration for comparison behavior.
#[derive(Debug, Clone, Default)]
pub struct CompareConfig {
    /// Report equal JSON keys and indices as `unchanged`
    pub show_all_objects: bool,
    /// Report identical text files with their full content
    pub show_all_files: bool,
    pub unmatched: UnmatchedPolicy,
    /// Entry names (exact or glob) treated like private entries
    pub ignore_patterns: Vec<String>,
    /// Files larger than this many bytes are not content-compared
    pub max_file_size: Option<u64>,
}

impl CompareConfig {
    /// Configuration with both verbosity flags set as given and defaults otherwise.
    pub fn with_verbosity(show_all_objects: bool, show_all_files: bool) -> Self {
        Self {
            show_all_objects,
            show_all_files,
            ..Default::default()
        }
    }
}
