//! snapdiff - compare two snapshot directories
//!
//! Walks two directory trees in lockstep and reports what changed: JSON files
//! are compared structurally, `.output` and `.cfg` files line by line, and
//! entries present on only one side are listed per directory.

pub mod compare;
pub mod error;
pub mod file_utils;
pub mod logger;
pub mod object_diff;
pub mod output;
pub mod text_diff;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use compare::{
    CompareConfig, DiffResult, SnapshotComparator, UnmatchedPolicy, compare_snapshots,
};
pub use error::{CompareError, Result};
pub use logger::{DiffLogger, TracingLogger};
pub use object_diff::{Change, ObjectDiff};
pub use output::{MarkdownFormatter, OutputConfig, ReportFormatter, print_json, print_markdown};
pub use text_diff::{ChangedLine, TextDiff};
